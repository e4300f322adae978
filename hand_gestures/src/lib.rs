//! # hand_gestures
//!
//! Geometric classification of a single 21-point hand.
//!
//! ## Signals → Modes
//!
//! | Signal | Threshold | Selects |
//! |---|---|---|
//! | thumb tip ↔ middle tip | `< 0.4 × hmax` | Pointer |
//! | thumb tip ↔ ring tip | `< 0.4 × hmax` | Volume |
//! | all fingers down (fist) | any | Shortcut |
//!
//! `hmax` is the palm width (index MCP ↔ pinky MCP) of the current frame, so
//! every threshold scales with the hand's distance from the camera. Tests are
//! applied in table order and the last one that fires wins; when none fires
//! the previous mode is kept.
//!
//! ## Shortcut patterns
//!
//! | Fingers (thumb..pinky) | Keys | Action |
//! |---|---|---|
//! | `1 0 0 0 0` | Alt + Tab | switch app |
//! | `0 1 0 0 0` | Win + Tab | task view |
//! | `0 1 1 0 0` | Win + PrtSc | screenshot |
//! | `0 0 1 1 1` | Win + D | show desktop |

pub mod classifier;
pub mod interp;
pub mod mode;
pub mod shortcut;

pub use classifier::{fingers_up, FingerState, HandMetrics};
pub use interp::interp;
pub use mode::{Mode, ModeSelector, PINCH_RATIO};
pub use shortcut::{match_shortcut, Cooldown, Key, Shortcut, SHORTCUTS};
