//! The per-frame pipeline.
//!
//! `Session` owns every piece of state the controller has: the provider, the
//! landmark store, the mode, the shortcut cooldowns and the backends. It is
//! built once at startup and driven one frame at a time by [`Session::step`].

use std::time::Instant;

use hand_actions::{Action, Backends, DispatchConfig, Dispatcher, Frame, Overlay};
use hand_gestures::{fingers_up, FingerState, HandMetrics, Mode, ModeSelector};
use hand_landmarks::{Landmark, LandmarkProvider, LandmarkStore};

use crate::error::Result;

/// What happened during one frame, for rendering and logging.
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub frame_size:   (u32, u32),
    pub landmarks:    Vec<Landmark>,
    pub fingers:      FingerState,
    pub metrics:      Option<HandMetrics>,
    pub mode:         Mode,
    pub mode_changed: bool,
    pub actions:      Vec<Action>,
    pub overlay:      Overlay,
}

impl FrameReport {
    /// True when a complete hand was classified this frame.
    pub fn has_hand(&self) -> bool { self.metrics.is_some() }
}

pub struct Session {
    provider:   Box<dyn LandmarkProvider>,
    store:      LandmarkStore,
    selector:   ModeSelector,
    dispatcher: Dispatcher,
    backends:   Backends,
    hand_index: usize,
    frames:     u64,
}

impl Session {
    /// Reads the screen size and volume range from `backends` once.
    pub fn new(
        provider:   Box<dyn LandmarkProvider>,
        backends:   Backends,
        dispatch:   DispatchConfig,
        scale:      f32,
        hand_index: usize,
    ) -> Self {
        let screen = backends.pointer.screen_size();
        let range  = backends.volume.volume_range();
        tracing::info!(
            "session: screen {}x{}, volume range {:.2}..{:.2}",
            screen.0, screen.1, range.0, range.1
        );

        Session {
            provider,
            store:      LandmarkStore::new(scale),
            selector:   ModeSelector::new(),
            dispatcher: Dispatcher::new(dispatch, screen, range),
            backends,
            hand_index,
            frames:     0,
        }
    }

    pub fn mode(&self) -> Mode { self.selector.mode() }

    pub fn frames(&self) -> u64 { self.frames }

    /// Process one frame. `Ok(None)` once the provider has no more frames.
    ///
    /// Frames without a complete hand are not classified and dispatch
    /// nothing; the mode carries over unchanged.
    pub fn step(&mut self, now: Instant) -> Result<Option<FrameReport>> {
        let Some(detection) = self.provider.next_detection()? else {
            return Ok(None);
        };
        self.frames += 1;
        self.store.set_snapshot(self.hand_index, &detection);

        let landmarks = self.store.landmarks();
        let mut report = FrameReport {
            frame_size: self.store.frame_size(),
            landmarks:  landmarks.to_vec(),
            mode:       self.selector.mode(),
            ..FrameReport::default()
        };

        let Some(metrics) = HandMetrics::measure(landmarks) else {
            return Ok(Some(report));
        };
        let fingers = fingers_up(landmarks);

        report.mode_changed = self.selector.update(fingers, &metrics);
        report.mode    = self.selector.mode();
        report.fingers = fingers;
        report.metrics = Some(metrics);

        let frame = Frame { mode: report.mode, landmarks, metrics, fingers };
        report.actions = self.dispatcher.dispatch(&frame, now, &mut report.overlay, &mut self.backends);

        tracing::debug!(
            "frame {}: fingers {} mode {} hmax {:.1} actions {}",
            self.frames, fingers, report.mode, metrics.hmax, report.actions.len()
        );
        Ok(Some(report))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::time::Duration;

    use hand_actions::DryRun;
    use hand_gestures::Key;
    use hand_landmarks::{DetectedHand, Detection, NormalizedPoint};

    struct Scripted(VecDeque<Detection>);

    impl LandmarkProvider for Scripted {
        fn next_detection(&mut self) -> hand_landmarks::Result<Option<Detection>> {
            Ok(self.0.pop_front())
        }
    }

    const W: u32 = 1024;
    const H: u32 = 1024;

    /// Pixel hand → normalized detection on a 1024×1024 frame at scale 1.
    /// A power-of-two frame keeps the round trip through `f32` exact.
    fn detection(points: &[(i32, i32)]) -> Detection {
        let mut d = Detection::empty(W, H);
        d.hands.push(DetectedHand {
            handedness: "Right".into(),
            score:      1.0,
            landmarks:  points
                .iter()
                .map(|&(x, y)| NormalizedPoint { x: x as f32 / W as f32, y: y as f32 / H as f32, z: 0.0 })
                .collect(),
        });
        d
    }

    /// Palm width 100 (5 → 17). Fingers up per `up` (index..pinky); thumb
    /// stays left of its MCP so it reads as down. No pinches.
    fn hand(up: [bool; 4]) -> Vec<(i32, i32)> {
        let tip_y = |u: bool| if u { 100 } else { 400 };
        vec![
            (400, 600),
            (300, 560), (280, 520), (260, 480), (240, 440),
            (400, 400), (400, 300), (400, 250), (400, tip_y(up[0])),
            (500, 400), (500, 300), (500, 250), (600, tip_y(up[1])),
            (600, 400), (600, 300), (600, 250), (700, tip_y(up[2])),
            (460, 480), (700, 300), (700, 250), (800, tip_y(up[3])),
        ]
    }

    fn session(frames: Vec<Detection>) -> Session {
        let backends = Backends {
            pointer: Box::new(DryRun::default()),
            hotkey:  Box::new(DryRun::default()),
            volume:  Box::new(DryRun::default()),
        };
        Session::new(Box::new(Scripted(frames.into())), backends, DispatchConfig::default(), 1.0, 0)
    }

    #[test]
    fn fixture_has_expected_shape() {
        let lm = hand_landmarks::landmarks_from_pixels(&hand([true, false, false, false]));
        let m = HandMetrics::measure(&lm).unwrap();
        assert_eq!(m.hmax, 100.0);
        assert_eq!(fingers_up(&lm).pattern(), [0, 1, 0, 0, 0]);
        assert!(fingers_up(&hand_landmarks::landmarks_from_pixels(&hand([false; 4]))).all_down());
    }

    #[test]
    fn no_hand_frame_dispatches_nothing_and_keeps_mode() {
        let mut s = session(vec![
            detection(&hand([false; 4])),
            Detection::empty(W, H),
        ]);
        let now = Instant::now();
        assert_eq!(s.step(now).unwrap().unwrap().mode, Mode::Shortcut);

        let r = s.step(now).unwrap().unwrap();
        assert!(!r.has_hand());
        assert!(r.actions.is_empty());
        assert!(r.overlay.is_empty());
        assert_eq!(r.mode, Mode::Shortcut);
        assert_eq!(s.mode(), Mode::Shortcut);
    }

    #[test]
    fn short_hand_is_not_classified() {
        let mut pts = hand([true; 4]);
        pts.truncate(20);
        let mut s = session(vec![detection(&pts)]);
        let r = s.step(Instant::now()).unwrap().unwrap();
        assert!(!r.has_hand());
        assert!(r.fingers.all_down());
        assert!(r.actions.is_empty());
    }

    #[test]
    fn end_of_stream_is_none() {
        let mut s = session(vec![]);
        assert!(s.step(Instant::now()).unwrap().is_none());
        assert_eq!(s.frames(), 0);
    }

    #[test]
    fn index_only_after_fist_fires_task_view_once_per_second() {
        let index_only = detection(&hand([true, false, false, false]));
        let mut s = session(vec![
            detection(&hand([false; 4])),
            index_only.clone(),
            index_only.clone(),
            index_only,
        ]);
        let t0 = Instant::now();

        // Fist selects shortcut mode; the fist itself maps to nothing.
        let r = s.step(t0).unwrap().unwrap();
        assert_eq!(r.mode, Mode::Shortcut);
        assert!(r.mode_changed);
        assert!(r.actions.is_empty());

        let r = s.step(t0 + Duration::from_millis(100)).unwrap().unwrap();
        assert_eq!(r.fingers.pattern(), [0, 1, 0, 0, 0]);
        assert_eq!(r.mode, Mode::Shortcut);
        assert!(!r.mode_changed);
        assert_eq!(r.actions, vec![Action::Hotkey { keys: &[Key::Meta, Key::Tab], action: "task view" }]);

        let r = s.step(t0 + Duration::from_millis(600)).unwrap().unwrap();
        assert!(r.actions.is_empty());

        let r = s.step(t0 + Duration::from_millis(1100)).unwrap().unwrap();
        assert_eq!(r.actions.len(), 1);
    }

    #[test]
    fn first_frame_defaults_to_pointer_and_moves() {
        let mut s = session(vec![detection(&hand([true, false, false, false]))]);
        let r = s.step(Instant::now()).unwrap().unwrap();
        assert_eq!(r.mode, Mode::Pointer);
        assert!(matches!(r.actions.as_slice(), [Action::MoveTo { .. }]));
    }

    #[test]
    fn thumb_ring_pinch_switches_to_volume() {
        let mut pts = hand([true; 4]);
        pts[4]  = (690, 110); // thumb tip next to ring tip
        let mut s = session(vec![detection(&pts)]);
        let r = s.step(Instant::now()).unwrap().unwrap();
        assert_eq!(r.mode, Mode::Volume);
        assert!(r.mode_changed);
    }
}
