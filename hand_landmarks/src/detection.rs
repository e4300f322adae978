//! Detector output for one frame.
//!
//! The wire format is one JSON object per line:
//!
//! ```text
//! {"width":640,"height":480,"hands":[{"handedness":"Right","score":0.97,
//!   "landmarks":[{"x":0.51,"y":0.62,"z":-0.01}, ... 21 points]}]}
//! ```
//!
//! Coordinates are normalized to the frame, `x, y ∈ [0, 1]`.

use serde::{Deserialize, Serialize};

/// A landmark as reported by the detector, normalized to the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// One detected hand.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedHand {
    #[serde(default)]
    pub handedness: String,
    #[serde(default = "full_score")]
    pub score: f32,
    pub landmarks: Vec<NormalizedPoint>,
}

fn full_score() -> f32 { 1.0 }

/// Everything the detector reported for one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub width:  u32,
    pub height: u32,
    #[serde(default)]
    pub hands:  Vec<DetectedHand>,
    /// Set by the detector when it failed on this frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error:  Option<String>,
}

impl Detection {
    /// A frame with no hands.
    pub fn empty(width: u32, height: u32) -> Self {
        Detection { width, height, hands: Vec::new(), error: None }
    }

    /// Parse one line of detector output.
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    pub fn has_hands(&self) -> bool { !self.hands.is_empty() }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_line() {
        let d = Detection::from_json_line(r#"{"width":640,"height":480}"#).unwrap();
        assert_eq!(d.width, 640);
        assert!(!d.has_hands());
        assert!(d.error.is_none());
    }

    #[test]
    fn missing_score_means_full_confidence() {
        let line = r#"{"width":10,"height":10,"hands":[{"landmarks":[{"x":0.5,"y":0.5}]}]}"#;
        let d = Detection::from_json_line(line).unwrap();
        assert_eq!(d.hands[0].score, 1.0);
        assert_eq!(d.hands[0].landmarks[0].z, 0.0);
    }

    #[test]
    fn error_field_is_carried() {
        let d = Detection::from_json_line(r#"{"width":1,"height":1,"error":"no frame"}"#).unwrap();
        assert_eq!(d.error.as_deref(), Some("no frame"));
    }
}
