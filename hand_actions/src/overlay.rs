//! Frame overlay as a list of draw commands.
//!
//! Dispatch code describes what to draw; the visualizer decides how. Colors
//! are packed `0xAARRGGBB`.

pub const MAGENTA:    u32 = 0xFFFF00FF;
pub const TITLE:      u32 = 0xFF2A7475;
pub const HOLD:       u32 = 0xFFE10000;
pub const POINTER:    u32 = 0xFFE100E1;
pub const CLICK:      u32 = 0xFF0000FF;
pub const VOLUME:     u32 = 0xFF00FF00;
pub const LOCK:       u32 = 0xFF0000FF;
pub const SHORTCUT:   u32 = 0xFFFF0000;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Circle { center: (i32, i32), radius: i32, color: u32, filled: bool },
    Line   { from: (i32, i32), to: (i32, i32), color: u32, thickness: i32 },
    Rect   { top_left: (i32, i32), bottom_right: (i32, i32), color: u32, filled: bool },
    Text   { pos: (i32, i32), text: String, color: u32, scale: i32 },
}

/// Draw commands collected for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub cmds: Vec<DrawCmd>,
}

impl Overlay {
    pub fn new() -> Self { Self::default() }

    pub fn circle(&mut self, center: (i32, i32), radius: i32, color: u32) {
        self.cmds.push(DrawCmd::Circle { center, radius, color, filled: true });
    }

    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: u32, thickness: i32) {
        self.cmds.push(DrawCmd::Line { from, to, color, thickness });
    }

    pub fn rect(&mut self, top_left: (i32, i32), bottom_right: (i32, i32), color: u32) {
        self.cmds.push(DrawCmd::Rect { top_left, bottom_right, color, filled: false });
    }

    pub fn fill_rect(&mut self, top_left: (i32, i32), bottom_right: (i32, i32), color: u32) {
        self.cmds.push(DrawCmd::Rect { top_left, bottom_right, color, filled: true });
    }

    pub fn text(&mut self, pos: (i32, i32), text: impl Into<String>, color: u32) {
        self.cmds.push(DrawCmd::Text { pos, text: text.into(), color, scale: 2 });
    }

    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }

    /// All text drawn this frame, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
