//! # hand_actions
//!
//! Turns a classified frame into one external action plus on-screen feedback.
//!
//! | Mode | Condition | Action |
//! |---|---|---|
//! | Pointer | index ↔ middle `< hmax` | hold (no move) |
//! | Pointer | thumb ↔ index `< 0.4 × hmax` | click |
//! | Pointer | otherwise | move to mirrored, mapped index tip |
//! | Volume | index ↔ middle `< hmax` | locked (no change) |
//! | Volume | otherwise | thumb ↔ index mapped onto volume range |
//! | Shortcut | exact finger pattern, not cooling down | hotkey |
//!
//! Backends are traits so the dispatcher can run against the real OS
//! ([`os`]), a logger ([`dry_run`]) or a recorder in tests.

pub mod backend;
pub mod dispatch;
pub mod dry_run;
pub mod os;
pub mod overlay;

pub use backend::{Action, ActionError, Backends, HotkeyBackend, PointerBackend, VolumeBackend};
pub use dispatch::{CaptureRect, DispatchConfig, Dispatcher, Frame};
pub use dry_run::DryRun;
pub use overlay::{DrawCmd, Overlay};
