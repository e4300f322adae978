//! cam_hand: command-line entry point.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cam_hand::{Config, RunOptions};

/// Control the pointer, volume and shortcuts with hand gestures.
#[derive(Parser, Debug)]
#[command(name = "cam_hand", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera index (overrides config)
    #[arg(long)]
    camera: Option<u32>,

    /// Replay a recorded JSON-lines detection file instead of the camera
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Log actions instead of moving the pointer or pressing keys
    #[arg(long)]
    dry_run: bool,

    /// Run without the overlay window
    #[arg(long)]
    headless: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        cam_hand : Webcam Hand-Gesture Controller             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Pinch thumb+middle → pointer   thumb+ring → volume   fist → shortcuts");
    println!("  Q or Esc in the window to quit");
    println!();

    info!("Starting {} v{}", cam_hand::NAME, cam_hand::VERSION);

    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(camera) = args.camera {
        cfg.detector.camera = camera;
    }
    if args.headless {
        cfg.display.headless = true;
    }
    cfg.validate()?;

    let opts = RunOptions { replay: args.replay, dry_run: args.dry_run };
    cam_hand::run(cfg, opts)?;

    info!("Shutdown complete");
    Ok(())
}
