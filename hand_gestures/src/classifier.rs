//! Finger-state and pinch-distance classification.
//!
//! Everything here is a pure function of one frame's landmarks. Nothing is
//! remembered between frames.

use std::fmt;

use hand_landmarks::{
    Landmark, LANDMARK_COUNT,
    THUMB_MCP, THUMB_TIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP,
    RING_PIP, RING_TIP, PINKY_MCP, PINKY_PIP, PINKY_TIP,
};

// ════════════════════════════════════════════════════════════════════════════
// FingerState
// ════════════════════════════════════════════════════════════════════════════

/// Which fingers are extended, thumb first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    /// Build from a `1/0` pattern, e.g. `[0, 1, 1, 0, 0]`.
    pub const fn from_pattern(p: [u8; 5]) -> Self {
        FingerState([p[0] != 0, p[1] != 0, p[2] != 0, p[3] != 0, p[4] != 0])
    }

    pub fn pattern(&self) -> [u8; 5] { self.0.map(u8::from) }

    pub fn count_up(&self) -> usize { self.0.iter().filter(|&&up| up).count() }

    /// True for a closed fist.
    pub fn all_down(&self) -> bool { self.count_up() == 0 }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.pattern();
        write!(f, "[{},{},{},{},{}]", p[0], p[1], p[2], p[3], p[4])
    }
}

/// Tip/joint pairs for the four long fingers: the finger is up when its tip
/// is higher on screen than the joint two segments below it.
const LONG_FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP,  INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP,   RING_PIP),
    (PINKY_TIP,  PINKY_PIP),
];

/// Classify which fingers are extended.
///
/// The thumb uses a horizontal test (tip right of its MCP joint) that does
/// not look at handedness, so it reads correctly for one hand orientation
/// only. Returns all-down when fewer than 21 landmarks are present.
pub fn fingers_up(lm: &[Landmark]) -> FingerState {
    let mut state = FingerState::default();
    if lm.len() < LANDMARK_COUNT { return state; }

    state.0[0] = lm[THUMB_TIP].x > lm[THUMB_MCP].x;
    for (i, &(tip, joint)) in LONG_FINGERS.iter().enumerate() {
        state.0[i + 1] = lm[tip].y < lm[joint].y;
    }
    state
}

// ════════════════════════════════════════════════════════════════════════════
// HandMetrics
// ════════════════════════════════════════════════════════════════════════════

/// Per-frame distances, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandMetrics {
    /// Palm width, index MCP ↔ pinky MCP. The unit every threshold scales by.
    pub hmax:         f32,
    pub index_middle: f32,
    pub thumb_index:  f32,
    pub thumb_middle: f32,
    pub thumb_ring:   f32,
}

impl HandMetrics {
    /// Measure a hand; `None` unless all 21 landmarks are present.
    pub fn measure(lm: &[Landmark]) -> Option<Self> {
        if lm.len() < LANDMARK_COUNT { return None; }
        let thumb = &lm[THUMB_TIP];
        Some(HandMetrics {
            hmax:         lm[PINKY_MCP].distance(&lm[INDEX_MCP]),
            index_middle: lm[INDEX_TIP].distance(&lm[MIDDLE_TIP]),
            thumb_index:  thumb.distance(&lm[INDEX_TIP]),
            thumb_middle: thumb.distance(&lm[MIDDLE_TIP]),
            thumb_ring:   thumb.distance(&lm[RING_TIP]),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
