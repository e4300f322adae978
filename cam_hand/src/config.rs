//! Configuration file (`cam_hand.toml`) and its defaults.
//!
//! Every section is optional; a missing file means all defaults. Pixel
//! values are in the scaled frame (`frame.scale` × camera resolution).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use hand_actions::{CaptureRect, DispatchConfig};
use hand_landmarks::DetectorOptions;

use crate::error::{CamHandError, ConfigError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub detector: DetectorConfig,
    pub frame:    FrameConfig,
    pub pointer:  PointerConfig,
    pub volume:   VolumeConfig,
    pub shortcut: ShortcutConfig,
    pub display:  DisplayConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CamHandError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::parse(&contents)
    }

    pub fn parse(s: &str) -> Result<Self, CamHandError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load `explicit` if given, otherwise the first of the default paths
    /// that exists, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CamHandError> {
        if let Some(path) = explicit {
            tracing::info!("Loading config from: {}", path.display());
            return Self::from_file(path);
        }

        let paths = [
            PathBuf::from("cam_hand.toml"),
            PathBuf::from("config/cam_hand.toml"),
        ];
        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), CamHandError> {
        let invalid = |field: &str, message: &str| -> CamHandError {
            ConfigError::InvalidValue { field: field.to_string(), message: message.to_string() }.into()
        };

        if !(0.0..=1.0).contains(&self.detector.detection_confidence) {
            return Err(invalid("detector.detection_confidence", "must be between 0.0 and 1.0"));
        }
        if !(0.0..=1.0).contains(&self.detector.tracking_confidence) {
            return Err(invalid("detector.tracking_confidence", "must be between 0.0 and 1.0"));
        }
        if self.detector.max_hands == 0 {
            return Err(invalid("detector.max_hands", "must be at least 1"));
        }
        if self.detector.hand_index >= self.detector.max_hands as usize {
            return Err(invalid("detector.hand_index", "must be below detector.max_hands"));
        }
        if self.frame.scale <= 0.0 {
            return Err(invalid("frame.scale", "must be greater than 0"));
        }
        let [left, top, right, bottom] = self.pointer.capture;
        if left >= right || top >= bottom {
            return Err(invalid("pointer.capture", "expected [left, top, right, bottom] with left < right and top < bottom"));
        }
        if self.volume.min_distance < 0.0 {
            return Err(invalid("volume.min_distance", "must not be negative"));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(invalid("display", "window size must be non-zero"));
        }
        Ok(())
    }

    pub fn detector_options(&self) -> DetectorOptions {
        let d = &self.detector;
        DetectorOptions {
            python:               d.python.clone(),
            script:               d.script.clone(),
            camera:               d.camera,
            max_hands:            d.max_hands,
            detection_confidence: d.detection_confidence,
            tracking_confidence:  d.tracking_confidence,
        }
    }

    pub fn dispatch_config(&self) -> DispatchConfig {
        let [left, top, right, bottom] = self.pointer.capture;
        DispatchConfig {
            capture:             CaptureRect { left, top, right, bottom },
            volume_min_distance: self.volume.min_distance,
            shortcut_cooldown:   Duration::from_millis(self.shortcut.cooldown_ms),
        }
    }
}

/// Detector helper process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub python:               String,
    pub script:               String,
    /// Camera index handed to the helper.
    pub camera:               u32,
    pub max_hands:            u32,
    pub detection_confidence: f32,
    pub tracking_confidence:  f32,
    /// Which detected hand drives the controller.
    pub hand_index:           usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let d = DetectorOptions::default();
        Self {
            python:               d.python,
            script:               d.script,
            camera:               d.camera,
            max_hands:            d.max_hands,
            detection_confidence: d.detection_confidence,
            tracking_confidence:  d.tracking_confidence,
            hand_index:           0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame enlargement applied before pixel conversion. All pixel
    /// thresholds are calibrated against the enlarged frame.
    pub scale: f32,
}

impl Default for FrameConfig {
    fn default() -> Self { Self { scale: 1.5 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// `[left, top, right, bottom]` of the region mapped onto the screen.
    pub capture: [i32; 4],
}

impl Default for PointerConfig {
    fn default() -> Self {
        let c = CaptureRect::default();
        Self { capture: [c.left, c.top, c.right, c.bottom] }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Thumb–index distance (pixels) that maps to minimum volume.
    pub min_distance: f32,
}

impl Default for VolumeConfig {
    fn default() -> Self { Self { min_distance: 20.0 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    pub cooldown_ms: u64,
}

impl Default for ShortcutConfig {
    fn default() -> Self { Self { cooldown_ms: 1000 } }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title:    String,
    pub width:    usize,
    pub height:   usize,
    /// Run without a window.
    pub headless: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title:    "cam_hand".to_string(),
            width:    960,
            height:   720,
            headless: false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.frame.scale, 1.5);
        assert_eq!(cfg.dispatch_config(), DispatchConfig::default());
        assert_eq!(cfg.detector_options(), DetectorOptions::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = Config::parse(
            r#"
            [detector]
            camera = 2

            [shortcut]
            cooldown_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(cfg.detector.camera, 2);
        assert_eq!(cfg.detector.max_hands, 2);
        assert_eq!(cfg.dispatch_config().shortcut_cooldown, Duration::from_millis(250));
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse("[frame\nscale = "),
            Err(CamHandError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn inverted_capture_rect_is_rejected() {
        let mut cfg = Config::default();
        cfg.pointer.capture = [550, 90, 120, 520];
        match cfg.validate() {
            Err(CamHandError::Config(ConfigError::InvalidValue { field, .. })) => {
                assert_eq!(field, "pointer.capture")
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn hand_index_must_fit_max_hands() {
        let mut cfg = Config::default();
        cfg.detector.hand_index = 2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[frame]\nscale = 1.0").unwrap();
        let cfg = Config::load(Some(f.path())).unwrap();
        assert_eq!(cfg.frame.scale, 1.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(matches!(
            Config::load(Some(Path::new("/no/such/cam_hand.toml"))),
            Err(CamHandError::Config(ConfigError::ReadFile(_)))
        ));
    }
}
