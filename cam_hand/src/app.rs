//! Startup wiring and the main loop.
//!
//! `run` opens the detector (live or replay), the backends (OS or dry-run)
//! and, unless headless, the overlay window, then steps the [`Session`] until
//! the stream ends or the user quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use hand_actions::os::{EnigoInput, PactlVolume};
use hand_actions::{Backends, DryRun};
use hand_landmarks::{LandmarkProvider, ReplayProvider, SubprocessProvider};

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// RunOptions
// ════════════════════════════════════════════════════════════════════════════

/// Command-line choices that are not part of the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Read detections from a recorded JSON-lines file instead of the camera.
    pub replay:   Option<PathBuf>,
    /// Log actions instead of performing them.
    pub dry_run:  bool,
}

// ════════════════════════════════════════════════════════════════════════════
// FpsCounter
// ════════════════════════════════════════════════════════════════════════════

/// Frames per second from the interval between consecutive frames.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    last: Option<Instant>,
    fps:  f32,
}

impl FpsCounter {
    pub fn new() -> Self { Self::default() }

    pub fn tick(&mut self, now: Instant) -> f32 {
        if let Some(last) = self.last {
            let dt = now.saturating_duration_since(last).as_secs_f32();
            if dt > 0.0 {
                self.fps = 1.0 / dt;
            }
        }
        self.last = Some(now);
        self.fps
    }

    pub fn fps(&self) -> f32 { self.fps }
}

// ════════════════════════════════════════════════════════════════════════════
// Wiring
// ════════════════════════════════════════════════════════════════════════════

pub fn open_provider(cfg: &Config, opts: &RunOptions) -> Result<Box<dyn LandmarkProvider>> {
    match &opts.replay {
        Some(path) => Ok(Box::new(ReplayProvider::open(path)?)),
        None => {
            let det = cfg.detector_options();
            tracing::info!("Starting detector: {} {} (camera {})", det.python, det.script, det.camera);
            Ok(Box::new(SubprocessProvider::spawn(&det)?))
        }
    }
}

/// Real backends fail startup when the volume endpoint is unreachable.
pub fn open_backends(opts: &RunOptions) -> Result<Backends> {
    if opts.dry_run {
        tracing::info!("Dry run: actions are logged, not performed");
        return Ok(Backends {
            pointer: Box::new(DryRun::default()),
            hotkey:  Box::new(DryRun::default()),
            volume:  Box::new(DryRun::default()),
        });
    }

    let volume = PactlVolume::open()?;
    Ok(Backends {
        pointer: Box::new(EnigoInput::new()),
        hotkey:  Box::new(EnigoInput::new()),
        volume:  Box::new(volume),
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Main loop
// ════════════════════════════════════════════════════════════════════════════

const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

pub fn run(cfg: Config, opts: RunOptions) -> Result<()> {
    let backends = open_backends(&opts)?;
    let provider = open_provider(&cfg, &opts)?;

    let mut vis = if cfg.display.headless {
        None
    } else {
        Some(Visualizer::new(&cfg.display)?)
    };

    let mut session = Session::new(
        provider,
        backends,
        cfg.dispatch_config(),
        cfg.frame.scale,
        cfg.detector.hand_index,
    );

    let mut fps = FpsCounter::new();
    let mut last_log = Instant::now();

    loop {
        if vis.as_ref().is_some_and(|v| v.poll_quit()) {
            tracing::info!("Window closed");
            break;
        }

        let now = Instant::now();
        let Some(report) = session.step(now)? else {
            tracing::info!("Detection stream ended");
            break;
        };
        let rate = fps.tick(now);

        if let Some(v) = vis.as_mut() {
            v.render(&report, rate)?;
        }
        if now.duration_since(last_log) >= FPS_LOG_INTERVAL {
            tracing::info!("{} frames, {:.1} fps, mode {}", session.frames(), rate, session.mode());
            last_log = now;
        }
    }

    tracing::info!("Processed {} frames", session.frames());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fps_from_frame_interval() {
        let mut f = FpsCounter::new();
        let t0 = Instant::now();
        assert_eq!(f.tick(t0), 0.0);
        let rate = f.tick(t0 + Duration::from_millis(40));
        assert!((rate - 25.0).abs() < 0.01);
        // A zero interval keeps the previous estimate.
        assert_eq!(f.tick(t0 + Duration::from_millis(40)), rate);
    }

    #[test]
    fn headless_dry_run_replays_to_end_of_stream() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"width": 640, "height": 480, "hands": []}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"width": 640, "height": 480}}"#).unwrap();

        let mut cfg = Config::default();
        cfg.display.headless = true;
        let opts = RunOptions { replay: Some(file.path().to_path_buf()), dry_run: true };
        run(cfg, opts).unwrap();
    }

    #[test]
    fn demo_session_fires_task_view_once() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../demos/fist_then_task_view.jsonl");
        let opts = RunOptions { replay: Some(path), dry_run: true };
        let cfg = Config::default();
        let mut session = Session::new(
            open_provider(&cfg, &opts).unwrap(),
            open_backends(&opts).unwrap(),
            cfg.dispatch_config(),
            cfg.frame.scale,
            0,
        );

        let t0 = Instant::now();
        let mut hotkeys = Vec::new();
        let mut i = 0;
        while let Some(report) = session.step(t0 + Duration::from_millis(i * 33)).unwrap() {
            hotkeys.extend(report.actions.into_iter().filter(|a| matches!(a, hand_actions::Action::Hotkey { .. })));
            i += 1;
        }
        assert_eq!(session.frames(), 37);
        assert_eq!(
            hotkeys,
            vec![hand_actions::Action::Hotkey { keys: &[hand_gestures::Key::Meta, hand_gestures::Key::Tab], action: "task view" }]
        );
    }

    #[test]
    fn missing_replay_file_is_an_error() {
        let opts = RunOptions { replay: Some(PathBuf::from("/no/such/session.jsonl")), dry_run: true };
        assert!(open_provider(&Config::default(), &opts).is_err());
    }

    #[test]
    fn dry_run_backends_report_defaults() {
        let b = open_backends(&RunOptions { dry_run: true, ..RunOptions::default() }).unwrap();
        assert_eq!(b.pointer.screen_size(), (1920, 1080));
        assert_eq!(b.volume.volume_range(), (0.0, 100.0));
    }
}
