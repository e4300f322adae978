//! Sticky three-state interaction mode.

use std::fmt;

use crate::classifier::{FingerState, HandMetrics};

/// Pinch threshold as a fraction of palm width.
pub const PINCH_RATIO: f32 = 0.4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Pointer,
    Volume,
    Shortcut,
}

impl Mode {
    /// On-screen banner for the mode.
    pub fn title(self) -> &'static str {
        match self {
            Mode::Pointer  => "AI Mouse Control",
            Mode::Volume   => "AI Volume Control",
            Mode::Shortcut => "AI Keyboard Shortcut Control",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Pointer  => "pointer",
            Mode::Volume   => "volume",
            Mode::Shortcut => "shortcut",
        };
        f.write_str(name)
    }
}

/// Holds the current mode between frames.
///
/// Starts in [`Mode::Pointer`]. Each frame the three tests run in order and
/// the last one that fires wins, so the fist test always has the final say.
/// When nothing fires the mode is left as it was.
#[derive(Clone, Debug, Default)]
pub struct ModeSelector {
    mode: Mode,
}

impl ModeSelector {
    pub fn new() -> Self { Self::default() }

    pub fn with_mode(mode: Mode) -> Self { ModeSelector { mode } }

    pub fn mode(&self) -> Mode { self.mode }

    /// Re-evaluate the mode for one frame. Returns true if it changed.
    pub fn update(&mut self, fingers: FingerState, m: &HandMetrics) -> bool {
        let before = self.mode;
        let pinch = m.hmax * PINCH_RATIO;

        if m.thumb_middle < pinch { self.mode = Mode::Pointer; }
        if m.thumb_ring   < pinch { self.mode = Mode::Volume;  }
        if fingers.all_down()     { self.mode = Mode::Shortcut; }

        if self.mode != before {
            tracing::info!("mode {} -> {}", before, self.mode);
        }
        self.mode != before
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(thumb_middle: f32, thumb_ring: f32) -> HandMetrics {
        HandMetrics {
            hmax: 100.0,
            index_middle: 120.0,
            thumb_index: 80.0,
            thumb_middle,
            thumb_ring,
        }
    }

    const OPEN: FingerState = FingerState::from_pattern([0, 1, 1, 1, 1]);
    const FIST: FingerState = FingerState::from_pattern([0, 0, 0, 0, 0]);

    #[test]
    fn starts_in_pointer() {
        assert_eq!(ModeSelector::new().mode(), Mode::Pointer);
    }

    #[test]
    fn thumb_ring_pinch_selects_volume() {
        let mut s = ModeSelector::new();
        assert!(s.update(OPEN, &metrics(90.0, 30.0)));
        assert_eq!(s.mode(), Mode::Volume);
    }

    #[test]
    fn thumb_middle_pinch_selects_pointer() {
        let mut s = ModeSelector::with_mode(Mode::Volume);
        s.update(OPEN, &metrics(30.0, 90.0));
        assert_eq!(s.mode(), Mode::Pointer);
    }

    #[test]
    fn later_test_wins_over_earlier() {
        let mut s = ModeSelector::new();
        s.update(OPEN, &metrics(10.0, 10.0));
        assert_eq!(s.mode(), Mode::Volume);
    }

    #[test]
    fn fist_has_final_say() {
        let mut s = ModeSelector::new();
        s.update(FIST, &metrics(10.0, 10.0));
        assert_eq!(s.mode(), Mode::Shortcut);
    }

    #[test]
    fn threshold_is_strict() {
        let mut s = ModeSelector::new();
        assert!(!s.update(OPEN, &metrics(90.0, 40.0)));
        assert_eq!(s.mode(), Mode::Pointer);
    }

    #[test]
    fn mode_is_sticky_when_nothing_fires() {
        let mut s = ModeSelector::new();
        s.update(FIST, &metrics(90.0, 90.0));
        for _ in 0..5 {
            assert!(!s.update(OPEN, &metrics(90.0, 90.0)));
            assert_eq!(s.mode(), Mode::Shortcut);
        }
    }

    #[test]
    fn titles_match_banners() {
        assert_eq!(Mode::Pointer.title(), "AI Mouse Control");
        assert_eq!(Mode::Shortcut.to_string(), "shortcut");
    }
}
