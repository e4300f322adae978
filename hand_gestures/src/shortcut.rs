//! Finger-pattern → key-combination table, and the per-pattern cooldown that
//! keeps a held gesture from firing every frame.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use crate::classifier::FingerState;

// ════════════════════════════════════════════════════════════════════════════
// Key
// ════════════════════════════════════════════════════════════════════════════

/// Keys used by the shortcut table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Alt,
    Tab,
    /// The Windows / Super / Command key.
    Meta,
    PrintScreen,
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Alt         => f.write_str("Alt"),
            Key::Tab         => f.write_str("Tab"),
            Key::Meta        => f.write_str("Win"),
            Key::PrintScreen => f.write_str("Prtsc"),
            Key::Char(c)     => write!(f, "{}", c.to_ascii_uppercase()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Shortcut table
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub pattern: FingerState,
    /// Pressed together, released in reverse.
    pub keys:    &'static [Key],
    pub action:  &'static str,
}

impl Shortcut {
    /// Combo label as drawn on screen, e.g. `"Alt + Tab"`.
    pub fn label(&self) -> String {
        self.keys.iter().map(Key::to_string).collect::<Vec<_>>().join(" + ")
    }
}

pub const SHORTCUTS: [Shortcut; 4] = [
    Shortcut {
        pattern: FingerState::from_pattern([1, 0, 0, 0, 0]),
        keys:    &[Key::Alt, Key::Tab],
        action:  "switch app",
    },
    Shortcut {
        pattern: FingerState::from_pattern([0, 1, 0, 0, 0]),
        keys:    &[Key::Meta, Key::Tab],
        action:  "task view",
    },
    Shortcut {
        pattern: FingerState::from_pattern([0, 1, 1, 0, 0]),
        keys:    &[Key::Meta, Key::PrintScreen],
        action:  "screenshot",
    },
    Shortcut {
        pattern: FingerState::from_pattern([0, 0, 1, 1, 1]),
        keys:    &[Key::Meta, Key::Char('d')],
        action:  "show desktop",
    },
];

/// Exact-match lookup. Anything not in [`SHORTCUTS`] (the fist included)
/// yields `None`.
pub fn match_shortcut(fingers: FingerState) -> Option<&'static Shortcut> {
    SHORTCUTS.iter().find(|s| s.pattern == fingers)
}

// ════════════════════════════════════════════════════════════════════════════
// Cooldown
// ════════════════════════════════════════════════════════════════════════════

/// Per-pattern suppression window on a monotonic clock.
///
/// Never sleeps; callers pass `now` so the frame loop keeps running while a
/// pattern is cooling down.
#[derive(Clone, Debug)]
pub struct Cooldown {
    period:    Duration,
    last_fire: HashMap<FingerState, Instant>,
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Cooldown { period, last_fire: HashMap::new() }
    }

    pub fn ready(&self, pattern: FingerState, now: Instant) -> bool {
        match self.last_fire.get(&pattern) {
            Some(&t) => now.saturating_duration_since(t) >= self.period,
            None     => true,
        }
    }

    pub fn fire(&mut self, pattern: FingerState, now: Instant) {
        self.last_fire.insert(pattern, now);
    }

    /// Stamp `pattern` and return true if it was ready.
    pub fn try_fire(&mut self, pattern: FingerState, now: Instant) -> bool {
        if !self.ready(pattern, now) { return false; }
        self.fire(pattern, now);
        true
    }
}

impl Default for Cooldown {
    fn default() -> Self { Cooldown::new(Duration::from_secs(1)) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_only_is_switch_app_and_nothing_else() {
        let s = match_shortcut(FingerState::from_pattern([1, 0, 0, 0, 0])).unwrap();
        assert_eq!(s.action, "switch app");
        assert_eq!(s.keys, &[Key::Alt, Key::Tab]);
        let hits = SHORTCUTS.iter().filter(|x| x.pattern == s.pattern).count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn fist_and_unknown_patterns_match_nothing() {
        assert!(match_shortcut(FingerState::from_pattern([0, 0, 0, 0, 0])).is_none());
        assert!(match_shortcut(FingerState::from_pattern([1, 1, 1, 1, 1])).is_none());
        assert!(match_shortcut(FingerState::from_pattern([0, 1, 1, 1, 0])).is_none());
    }

    #[test]
    fn every_table_pattern_matches_itself() {
        for s in SHORTCUTS.iter() {
            assert_eq!(match_shortcut(s.pattern), Some(s));
        }
    }

    #[test]
    fn labels_read_like_key_combos() {
        let labels: Vec<String> = SHORTCUTS.iter().map(Shortcut::label).collect();
        assert_eq!(labels, ["Alt + Tab", "Win + Tab", "Win + Prtsc", "Win + D"]);
    }

    #[test]
    fn cooldown_suppresses_within_period() {
        let p = SHORTCUTS[1].pattern;
        let t0 = Instant::now();
        let mut cd = Cooldown::new(Duration::from_secs(1));
        assert!(cd.try_fire(p, t0));
        assert!(!cd.try_fire(p, t0 + Duration::from_millis(999)));
        assert!(cd.try_fire(p, t0 + Duration::from_secs(1)));
    }

    #[test]
    fn cooldown_is_per_pattern() {
        let t0 = Instant::now();
        let mut cd = Cooldown::default();
        assert!(cd.try_fire(SHORTCUTS[0].pattern, t0));
        assert!(cd.ready(SHORTCUTS[2].pattern, t0));
        assert!(!cd.ready(SHORTCUTS[0].pattern, t0));
    }
}
