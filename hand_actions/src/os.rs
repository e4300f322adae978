//! Real OS backends.
//!
//! * pointer and hotkeys through `enigo`
//! * output volume through PulseAudio's `pactl` (percent, 0–100)

use std::process::Command;

use enigo::{Enigo, KeyboardControllable, MouseButton, MouseControllable};

use hand_gestures::Key;

use crate::backend::{ActionError, HotkeyBackend, PointerBackend, Result, VolumeBackend};

// ════════════════════════════════════════════════════════════════════════════
// enigo: pointer + hotkeys
// ════════════════════════════════════════════════════════════════════════════

#[cfg(target_os = "windows")]
const PRINT_SCREEN: enigo::Key = enigo::Key::Snapshot; // VK_SNAPSHOT
#[cfg(target_os = "linux")]
const PRINT_SCREEN: enigo::Key = enigo::Key::Print;    // keysym "Print"
#[cfg(target_os = "macos")]
const PRINT_SCREEN: enigo::Key = enigo::Key::F13;

fn to_enigo(key: Key) -> enigo::Key {
    match key {
        Key::Alt         => enigo::Key::Alt,
        Key::Tab         => enigo::Key::Tab,
        Key::Meta        => enigo::Key::Meta,
        Key::PrintScreen => PRINT_SCREEN,
        Key::Char(c)     => enigo::Key::Layout(c),
    }
}

/// Synthetic input through `enigo`. Used for both pointer and hotkeys.
pub struct EnigoInput {
    enigo:  Enigo,
    screen: (i32, i32),
}

impl EnigoInput {
    pub fn new() -> Self {
        let enigo  = Enigo::new();
        let screen = enigo.main_display_size();
        tracing::info!("main display: {}x{}", screen.0, screen.1);
        EnigoInput { enigo, screen }
    }
}

impl Default for EnigoInput {
    fn default() -> Self { Self::new() }
}

impl PointerBackend for EnigoInput {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo.mouse_move_to(x, y);
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        self.enigo.mouse_click(MouseButton::Left);
        Ok(())
    }

    fn screen_size(&self) -> (i32, i32) { self.screen }
}

impl HotkeyBackend for EnigoInput {
    fn send_hotkey(&mut self, keys: &[Key]) -> Result<()> {
        for &k in keys {
            self.enigo.key_down(to_enigo(k));
        }
        for &k in keys.iter().rev() {
            self.enigo.key_up(to_enigo(k));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// pactl: output volume
// ════════════════════════════════════════════════════════════════════════════

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

/// Default PulseAudio/PipeWire sink, driven through `pactl`.
pub struct PactlVolume {
    sink: String,
}

impl PactlVolume {
    /// Probe the default sink. Fails if `pactl` is missing or there is no
    /// audio endpoint to control.
    pub fn open() -> Result<Self> {
        let out = Command::new("pactl")
            .args(["get-sink-volume", DEFAULT_SINK])
            .output()
            .map_err(|e| ActionError::Unavailable(format!("pactl: {}", e)))?;
        if !out.status.success() {
            return Err(ActionError::Unavailable(format!(
                "no default audio sink: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }
        tracing::info!("audio sink: {}", String::from_utf8_lossy(&out.stdout).trim());
        Ok(PactlVolume { sink: DEFAULT_SINK.to_string() })
    }
}

impl VolumeBackend for PactlVolume {
    fn volume_range(&self) -> (f32, f32) { (0.0, 100.0) }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        let arg = format!("{}%", level.clamp(0.0, 100.0).round() as u32);
        let out = Command::new("pactl")
            .args(["set-sink-volume", &self.sink, &arg])
            .output()?;
        if !out.status.success() {
            return Err(ActionError::Command {
                cmd:    format!("pactl set-sink-volume {} {}", self.sink, arg),
                detail: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_onto_enigo() {
        assert_eq!(to_enigo(Key::Alt), enigo::Key::Alt);
        assert_eq!(to_enigo(Key::Char('d')), enigo::Key::Layout('d'));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn print_screen_is_the_named_keysym_on_linux() {
        // Raw keycodes are sent to xdo as decimal strings, which are not keysyms.
        assert_eq!(to_enigo(Key::PrintScreen), enigo::Key::Print);
        assert!(!matches!(to_enigo(Key::PrintScreen), enigo::Key::Raw(_)));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn print_screen_is_vk_snapshot_on_windows() {
        assert_eq!(to_enigo(Key::PrintScreen), enigo::Key::Snapshot);
    }
}
