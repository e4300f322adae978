//! # hand_landmarks
//!
//! Consumes the output of an external 21-point hand landmark detector and
//! keeps the most recent hand as a list of pixel-space [`Landmark`]s.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |---|---|
//! | [`Detection`] | One frame of detector output (normalized points, per hand) |
//! | [`LandmarkProvider`] | Anything that yields a `Detection` per frame |
//! | [`SubprocessProvider`] | Spawns the detector helper and reads JSON lines |
//! | [`ReplayProvider`] | Replays a recorded JSON-lines session from disk |
//! | [`LandmarkStore`] | Holds the selected hand, converted to pixels |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use hand_landmarks::{LandmarkProvider, LandmarkStore, ReplayProvider};
//!
//! let mut provider = ReplayProvider::open("session.jsonl").unwrap();
//! let mut store    = LandmarkStore::new(1.5);
//!
//! while let Some(detection) = provider.next_detection().unwrap() {
//!     store.set_snapshot(0, &detection);
//!     if let Some(tip) = store.landmarks().get(hand_landmarks::INDEX_TIP) {
//!         println!("index tip at ({}, {})", tip.x, tip.y);
//!     }
//! }
//! ```

pub mod detection;
pub mod error;
pub mod landmark;
pub mod provider;
pub mod store;

pub use detection::{DetectedHand, Detection, NormalizedPoint};
pub use error::LandmarkError;
pub use landmark::*;
pub use provider::{DetectorOptions, LandmarkProvider, ReplayProvider, SubprocessProvider};
pub use store::LandmarkStore;

/// Result alias for landmark operations.
pub type Result<T> = std::result::Result<T, LandmarkError>;
