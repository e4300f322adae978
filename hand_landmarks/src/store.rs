//! The per-frame landmark store.
//!
//! Holds exactly one hand: the one selected from the latest detection,
//! converted to pixel coordinates. Every call to [`LandmarkStore::set_snapshot`]
//! replaces the previous contents; nothing is merged across frames.

use crate::detection::Detection;
use crate::landmark::{Landmark, LANDMARK_COUNT};

#[derive(Debug, Clone)]
pub struct LandmarkStore {
    /// Multiplier applied to the frame size before pixel conversion.
    scale:     f32,
    landmarks: Vec<Landmark>,
    frame:     (u32, u32),
}

impl LandmarkStore {
    pub fn new(scale: f32) -> Self {
        LandmarkStore {
            scale,
            landmarks: Vec::with_capacity(LANDMARK_COUNT),
            frame:     (0, 0),
        }
    }

    /// Select hand `hand_index` from `detection` and store its landmarks in
    /// pixel space. An out-of-range index or a frame with no hands leaves the
    /// store empty.
    pub fn set_snapshot(&mut self, hand_index: usize, detection: &Detection) {
        self.landmarks.clear();

        let w = (detection.width  as f32 * self.scale) as u32;
        let h = (detection.height as f32 * self.scale) as u32;
        self.frame = (w, h);

        let Some(hand) = detection.hands.get(hand_index) else { return };

        if hand.landmarks.len() != LANDMARK_COUNT {
            tracing::warn!(
                "expected {} landmarks, got {}",
                LANDMARK_COUNT,
                hand.landmarks.len()
            );
        }

        self.landmarks.extend(hand.landmarks.iter().enumerate().map(|(id, p)| {
            Landmark::new(id, (p.x * w as f32) as i32, (p.y * h as f32) as i32)
        }));
    }

    /// Current landmarks, or an empty slice when no hand was detected.
    pub fn landmarks(&self) -> &[Landmark] { &self.landmarks }

    pub fn is_empty(&self) -> bool { self.landmarks.is_empty() }

    /// Scaled frame size of the last snapshot, in pixels.
    pub fn frame_size(&self) -> (u32, u32) { self.frame }
}

impl Default for LandmarkStore {
    fn default() -> Self { LandmarkStore::new(1.0) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
