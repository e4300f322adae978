//! # cam_hand
//!
//! Webcam hand-gesture controller. Each camera frame flows through:
//!
//! ```text
//! detector ─► LandmarkStore ─► fingers_up / HandMetrics ─► ModeSelector
//!                                                              │
//!                         overlay window ◄── Dispatcher ◄──────┘
//!                                                │
//!                                 pointer / volume / hotkey backends
//! ```
//!
//! | Module | Role |
//! |---|---|
//! | [`config`] | `cam_hand.toml` sections and validation |
//! | [`session`] | Owns the per-frame pipeline and its state |
//! | [`visualizer`] | `minifb` window: skeleton, overlay, status bar |
//! | [`app`] | Startup wiring and the main loop |

pub mod app;
pub mod config;
pub mod error;
pub mod session;
pub mod visualizer;

pub use app::{run, RunOptions};
pub use config::Config;
pub use error::{CamHandError, ConfigError, Result};
pub use session::{FrameReport, Session};

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
