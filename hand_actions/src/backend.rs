//! OS collaborator contracts and the [`Action`]s sent through them.
//!
//! All actions are fire-and-forget: no retry, no acknowledgment.

use thiserror::Error;

use hand_gestures::Key;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("`{cmd}` failed: {detail}")]
    Command { cmd: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ActionError>;

// ════════════════════════════════════════════════════════════════════════════
// Backend traits
// ════════════════════════════════════════════════════════════════════════════

pub trait PointerBackend {
    /// Absolute move, in screen pixels.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;
    /// Primary-button click at the current position.
    fn click(&mut self) -> Result<()>;
    fn screen_size(&self) -> (i32, i32);
}

pub trait HotkeyBackend {
    /// Press `keys` together, release in reverse order.
    fn send_hotkey(&mut self, keys: &[Key]) -> Result<()>;
}

pub trait VolumeBackend {
    /// `(min, max)` in the endpoint's own units.
    fn volume_range(&self) -> (f32, f32);
    fn set_volume(&mut self, level: f32) -> Result<()>;
}

// ════════════════════════════════════════════════════════════════════════════
// Action
// ════════════════════════════════════════════════════════════════════════════

/// One external side effect decided by the dispatcher.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    MoveTo    { x: i32, y: i32 },
    Click,
    SetVolume { level: f32 },
    Hotkey    { keys: &'static [Key], action: &'static str },
}

/// The three backends a session drives.
pub struct Backends {
    pub pointer: Box<dyn PointerBackend>,
    pub hotkey:  Box<dyn HotkeyBackend>,
    pub volume:  Box<dyn VolumeBackend>,
}

impl Backends {
    /// Perform one action. Failures are logged and swallowed.
    pub fn perform(&mut self, action: &Action) {
        let result = match action {
            Action::MoveTo { x, y }       => self.pointer.move_to(*x, *y),
            Action::Click                 => self.pointer.click(),
            Action::SetVolume { level }   => self.volume.set_volume(*level),
            Action::Hotkey { keys, .. }   => self.hotkey.send_hotkey(keys),
        };
        if let Err(e) = result {
            tracing::warn!("{:?} failed: {}", action, e);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
