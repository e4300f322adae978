//! Per-mode action dispatch.
//!
//! [`Dispatcher::plan`] is pure apart from the shortcut cooldown: it turns one
//! frame's classification into at most one [`Action`] plus overlay feedback.
//! [`Dispatcher::dispatch`] plans and then performs through [`Backends`].

use std::time::{Duration, Instant};

use hand_gestures::{interp, match_shortcut, Cooldown, FingerState, HandMetrics, Mode, PINCH_RATIO};
use hand_landmarks::{Landmark, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};

use crate::backend::{Action, Backends};
use crate::overlay::{self, Overlay};

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// On-frame rectangle that maps onto the whole screen in pointer mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureRect {
    pub left:   i32,
    pub top:    i32,
    pub right:  i32,
    pub bottom: i32,
}

impl Default for CaptureRect {
    fn default() -> Self {
        CaptureRect { left: 120, top: 90, right: 550, bottom: 520 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DispatchConfig {
    pub capture:             CaptureRect,
    /// Thumb–index distance that maps to minimum volume, in pixels.
    pub volume_min_distance: f32,
    pub shortcut_cooldown:   Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            capture:             CaptureRect::default(),
            volume_min_distance: 20.0,
            shortcut_cooldown:   Duration::from_secs(1),
        }
    }
}

// Volume bar geometry.
const BAR_LEFT:   i32 = 50;
const BAR_RIGHT:  i32 = 85;
const BAR_TOP:    i32 = 150;
const BAR_BOTTOM: i32 = 400;
const FOOTER:     (i32, i32) = (40, 450);
const TITLE_POS:  (i32, i32) = (10, 30);

// ════════════════════════════════════════════════════════════════════════════
// Frame input
// ════════════════════════════════════════════════════════════════════════════

/// Everything the dispatcher needs from one classified frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub mode:      Mode,
    pub landmarks: &'a [Landmark],
    pub metrics:   HandMetrics,
    pub fingers:   FingerState,
}

// ════════════════════════════════════════════════════════════════════════════
// Dispatcher
// ════════════════════════════════════════════════════════════════════════════

pub struct Dispatcher {
    cfg:          DispatchConfig,
    screen:       (i32, i32),
    volume_range: (f32, f32),
    cooldown:     Cooldown,
}

impl Dispatcher {
    /// `screen` and `volume_range` are read once at startup.
    pub fn new(cfg: DispatchConfig, screen: (i32, i32), volume_range: (f32, f32)) -> Self {
        let cooldown = Cooldown::new(cfg.shortcut_cooldown);
        Dispatcher { cfg, screen, volume_range, cooldown }
    }

    /// Plan and perform. Returns the actions that were sent.
    pub fn dispatch(
        &mut self,
        frame:    &Frame<'_>,
        now:      Instant,
        overlay:  &mut Overlay,
        backends: &mut Backends,
    ) -> Vec<Action> {
        let actions = self.plan(frame, now, overlay);
        for a in &actions {
            tracing::debug!("dispatch {:?}", a);
            backends.perform(a);
        }
        actions
    }

    /// Decide the frame's actions and append its feedback to `overlay`.
    pub fn plan(&mut self, frame: &Frame<'_>, now: Instant, overlay: &mut Overlay) -> Vec<Action> {
        overlay.text(TITLE_POS, frame.mode.title(), overlay::TITLE);
        match frame.mode {
            Mode::Pointer  => self.plan_pointer(frame, overlay),
            Mode::Volume   => self.plan_volume(frame, overlay),
            Mode::Shortcut => self.plan_shortcut(frame, now, overlay),
        }
    }

    // ── Pointer ──────────────────────────────────────────────────────────

    fn plan_pointer(&self, f: &Frame<'_>, overlay: &mut Overlay) -> Vec<Action> {
        let c = self.cfg.capture;
        overlay.rect((c.left, c.bottom), (c.right, c.top), overlay::MAGENTA);

        let index = f.landmarks[INDEX_TIP].position();
        let thumb = f.landmarks[THUMB_TIP].position();
        let m = &f.metrics;

        if m.index_middle < m.hmax {
            // Index and middle held together: freeze the pointer.
            overlay.circle(index, 10, overlay::HOLD);
            Vec::new()
        } else if m.thumb_index < m.hmax * PINCH_RATIO {
            overlay.circle(thumb, 5, overlay::CLICK);
            vec![Action::Click]
        } else {
            overlay.circle(index, 10, overlay::POINTER);
            let (x, y) = self.map_to_screen(index);
            vec![Action::MoveTo { x, y }]
        }
    }

    /// Map a frame position inside the capture rectangle to screen pixels,
    /// mirrored horizontally so the pointer follows the hand as in a mirror.
    pub fn map_to_screen(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let c = self.cfg.capture;
        let (sw, sh) = (self.screen.0 as f32, self.screen.1 as f32);
        let sx = interp(x as f32, (c.left as f32, c.right as f32), (0.0, sw));
        let sy = interp(y as f32, (c.top as f32, c.bottom as f32), (0.0, sh));
        ((sw - sx) as i32, sy as i32)
    }

    // ── Volume ───────────────────────────────────────────────────────────

    fn plan_volume(&self, f: &Frame<'_>, overlay: &mut Overlay) -> Vec<Action> {
        let thumb  = &f.landmarks[THUMB_TIP];
        let index  = &f.landmarks[INDEX_TIP];
        let middle = &f.landmarks[MIDDLE_TIP];
        let span = f.metrics.hmax * 2.0;

        overlay.circle(thumb.position(), 10, overlay::MAGENTA);
        overlay.circle(index.position(), 10, overlay::MAGENTA);
        overlay.line(thumb.position(), index.position(), overlay::MAGENTA, 3);
        overlay.circle(thumb.midpoint(index), 5, overlay::MAGENTA);

        if f.metrics.index_middle < span * 0.5 {
            overlay.circle(middle.midpoint(index), 5, overlay::LOCK);
            return Vec::new();
        }

        let d = f.metrics.thumb_index;
        let level   = self.volume_level(d, span);
        let bar_top = interp(d, (self.cfg.volume_min_distance, span), (BAR_BOTTOM as f32, BAR_TOP as f32));
        let percent = interp(d, (self.cfg.volume_min_distance, span), (0.0, 100.0));

        overlay.rect((BAR_LEFT, BAR_TOP), (BAR_RIGHT, BAR_BOTTOM), overlay::VOLUME);
        overlay.fill_rect((BAR_LEFT, bar_top as i32), (BAR_RIGHT, BAR_BOTTOM), overlay::VOLUME);
        overlay.text(FOOTER, format!(": {}%", percent as i32), overlay::VOLUME);

        vec![Action::SetVolume { level }]
    }

    /// Thumb–index distance mapped onto the backend's volume range, clamped
    /// to `[volume_min_distance, span]`.
    pub fn volume_level(&self, distance: f32, span: f32) -> f32 {
        interp(distance, (self.cfg.volume_min_distance, span), self.volume_range)
    }

    // ── Shortcut ─────────────────────────────────────────────────────────

    fn plan_shortcut(&mut self, f: &Frame<'_>, now: Instant, overlay: &mut Overlay) -> Vec<Action> {
        let Some(shortcut) = match_shortcut(f.fingers) else { return Vec::new() };

        overlay.text(FOOTER, shortcut.label(), overlay::SHORTCUT);

        if !self.cooldown.try_fire(shortcut.pattern, now) {
            return Vec::new();
        }
        tracing::info!("shortcut {} ({})", shortcut.label(), shortcut.action);
        vec![Action::Hotkey { keys: shortcut.keys, action: shortcut.action }]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
