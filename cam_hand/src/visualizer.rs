//! Software-rendered overlay window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  AI Mouse Control                                        │
//! │                                                          │
//! │        [hand skeleton + dispatcher overlay]              │
//! │                                                          │
//! │  status bar: mode, fingers, fps                          │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything the dispatcher draws is in frame pixels; the window scales the
//! frame to fit.

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_actions::DrawCmd;
use hand_landmarks::HAND_CONNECTIONS;

use crate::config::DisplayConfig;
use crate::error::{CamHandError, Result};
use crate::session::FrameReport;

// ════════════════════════════════════════════════════════════════════════════
// Colors
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:     u32 = 0xFF1A1A2E;
const BONE_COLOR:   u32 = 0xFFEEEEEE;
const JOINT_COLOR:  u32 = 0xFFFF3030;
const TEXT_BG:      u32 = 0xFF0F3460;
const STATUS_COLOR: u32 = 0xFFEEEEEE;
const LEGEND_COLOR: u32 = 0xFF888888;
const STATUS_H:     i32 = 36;

// ════════════════════════════════════════════════════════════════════════════
// Canvas
// ════════════════════════════════════════════════════════════════════════════

/// ARGB framebuffer with clipped drawing primitives.
pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BG_COLOR; width * height] }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn buffer(&self) -> &[u32] { &self.buf }

    pub fn clear(&mut self, color: u32) { self.buf.fill(color); }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    /// Corners in any order; both inclusive.
    pub fn fill_rect(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
        let (left, right) = (x0.min(x1).max(0), x0.max(x1).min(self.width as i32 - 1));
        let (top, bottom) = (y0.min(y1).max(0), y0.max(y1).min(self.height as i32 - 1));
        for y in top..=bottom {
            for x in left..=right {
                self.set_pixel(x, y, color);
            }
        }
    }

    pub fn draw_border(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: u32) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        for x in left..=right {
            self.set_pixel(x, top, color);
            self.set_pixel(x, bottom, color);
        }
        for y in top..=bottom {
            self.set_pixel(left, y, color);
            self.set_pixel(right, y, color);
        }
    }

    /// Bresenham; `thickness` stamps a square brush at each step.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: u32, thickness: i32) {
        let r = (thickness.max(1) - 1) / 2;
        let (mut x, mut y) = from;
        let dx =  (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.fill_rect((x - r, y - r), (x + r, y + r), color);
            if (x, y) == to { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    pub fn draw_circle(&mut self, (cx, cy): (i32, i32), radius: i32, color: u32, filled: bool) {
        let r2    = radius * radius;
        let inner = (radius - 1).max(0).pow(2);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 && (filled || d2 > inner) {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Minimal bitmap font: 3×5 glyphs, each pixel drawn `scale`×`scale`.
    pub fn draw_label(&mut self, text: &str, (x, y): (i32, i32), color: u32, scale: i32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        let px = cx + col * scale;
                        let py = y + row as i32 * scale;
                        self.fill_rect((px, py), (px + scale - 1, py + scale - 1), color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx >= self.width as i32 { break; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    canvas: Canvas,
}

impl Visualizer {
    pub fn new(cfg: &DisplayConfig) -> Result<Self> {
        let mut window = Window::new(
            &cfg.title,
            cfg.width, cfg.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| CamHandError::Display(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16)));

        Ok(Visualizer { window, canvas: Canvas::new(cfg.width, cfg.height) })
    }

    /// True once Q or Esc has been pressed, or the window was closed.
    pub fn poll_quit(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
    }

    /// Render one frame.
    pub fn render(&mut self, report: &FrameReport, fps: f32) -> Result<()> {
        draw_frame(&mut self.canvas, report, fps);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        self.window
            .update_with_buffer(self.canvas.buffer(), w, h)
            .map_err(|e| CamHandError::Display(e.to_string()))
    }
}

/// Paint `report` onto `canvas`.
pub fn draw_frame(canvas: &mut Canvas, report: &FrameReport, fps: f32) {
    canvas.clear(BG_COLOR);
    let to_canvas = frame_transform(report.frame_size, canvas.width(), canvas.height());

    // ── Skeleton ──────────────────────────────────────────────────────────
    let lm = &report.landmarks;
    for &(a, b) in HAND_CONNECTIONS.iter() {
        if let (Some(a), Some(b)) = (lm.get(a), lm.get(b)) {
            canvas.draw_line(to_canvas.apply(a.position()), to_canvas.apply(b.position()), BONE_COLOR, 2);
        }
    }
    for l in lm {
        canvas.draw_circle(to_canvas.apply(l.position()), 3, JOINT_COLOR, true);
    }

    // ── Dispatcher overlay ────────────────────────────────────────────────
    for cmd in &report.overlay.cmds {
        match cmd {
            DrawCmd::Circle { center, radius, color, filled } => {
                canvas.draw_circle(to_canvas.apply(*center), to_canvas.length(*radius), *color, *filled)
            }
            DrawCmd::Line { from, to, color, thickness } => {
                canvas.draw_line(to_canvas.apply(*from), to_canvas.apply(*to), *color, to_canvas.length(*thickness))
            }
            DrawCmd::Rect { top_left, bottom_right, color, filled: true } => {
                canvas.fill_rect(to_canvas.apply(*top_left), to_canvas.apply(*bottom_right), *color)
            }
            DrawCmd::Rect { top_left, bottom_right, color, filled: false } => {
                canvas.draw_border(to_canvas.apply(*top_left), to_canvas.apply(*bottom_right), *color)
            }
            DrawCmd::Text { pos, text, color, scale } => {
                canvas.draw_label(text, to_canvas.apply(*pos), *color, to_canvas.length(*scale))
            }
        }
    }

    // ── Status bar ────────────────────────────────────────────────────────
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let status_y = h - STATUS_H;
    canvas.fill_rect((0, status_y), (w - 1, h - 1), TEXT_BG);
    let hand = if report.has_hand() { format!("fingers {}", report.fingers) } else { "no hand".to_string() };
    canvas.draw_label(
        &format!("mode {}  {}  fps {:.0}", report.mode, hand, fps),
        (10, status_y + 8), STATUS_COLOR, 2,
    );

    // ── Key legend ────────────────────────────────────────────────────────
    canvas.draw_label("Q/Esc=quit", (10, h - 10), LEGEND_COLOR, 1);
}

/// Frame → canvas mapping: uniform scale, top-left anchored.
#[derive(Clone, Copy, Debug)]
struct Transform {
    scale: f32,
}

impl Transform {
    fn apply(&self, (x, y): (i32, i32)) -> (i32, i32) {
        ((x as f32 * self.scale) as i32, (y as f32 * self.scale) as i32)
    }

    fn length(&self, n: i32) -> i32 {
        ((n as f32) * self.scale).round().max(1.0) as i32
    }
}

fn frame_transform((fw, fh): (u32, u32), cw: usize, ch: usize) -> Transform {
    if fw == 0 || fh == 0 {
        return Transform { scale: 1.0 };
    }
    Transform { scale: (cw as f32 / fw as f32).min(ch as f32 / fh as f32) }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '[' => [0b110, 0b100, 0b100, 0b100, 0b110],
        ']' => [0b011, 0b001, 0b001, 0b001, 0b011],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
