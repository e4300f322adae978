//! Backends that only log. Used with `--dry-run` and when replaying a
//! recorded session on a machine that should not be driven.

use hand_gestures::Key;

use crate::backend::{HotkeyBackend, PointerBackend, Result, VolumeBackend};

#[derive(Debug, Clone)]
pub struct DryRun {
    screen: (i32, i32),
    range:  (f32, f32),
}

impl DryRun {
    pub fn new(screen: (i32, i32), range: (f32, f32)) -> Self {
        DryRun { screen, range }
    }
}

impl Default for DryRun {
    fn default() -> Self { DryRun::new((1920, 1080), (0.0, 100.0)) }
}

impl PointerBackend for DryRun {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        tracing::debug!("[dry-run] move to ({}, {})", x, y);
        Ok(())
    }

    fn click(&mut self) -> Result<()> {
        tracing::info!("[dry-run] click");
        Ok(())
    }

    fn screen_size(&self) -> (i32, i32) { self.screen }
}

impl HotkeyBackend for DryRun {
    fn send_hotkey(&mut self, keys: &[Key]) -> Result<()> {
        let combo: Vec<String> = keys.iter().map(Key::to_string).collect();
        tracing::info!("[dry-run] hotkey {}", combo.join(" + "));
        Ok(())
    }
}

impl VolumeBackend for DryRun {
    fn volume_range(&self) -> (f32, f32) { self.range }

    fn set_volume(&mut self, level: f32) -> Result<()> {
        tracing::debug!("[dry-run] volume {:.1}", level);
        Ok(())
    }
}
