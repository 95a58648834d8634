//! The frame pipeline: extract → classify → debounce → dispatch.
//!
//! [`GesturePipeline`] is the one stateful object a host owns per detection
//! session. It is driven once per video frame from a single polling loop;
//! nothing here blocks, suspends, or reads a clock of its own.

use std::time::Instant;

use hand_track::{HandFeatures, HandObservation};

use crate::classify::{classify, GestureLabel};
use crate::debounce::DebounceState;

// ════════════════════════════════════════════════════════════════════════════
// External outputs
// ════════════════════════════════════════════════════════════════════════════

/// The scene's persistent binary configuration, read by the rendering layer
/// every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneMode {
    /// Particles gathered into the tree.
    Assembled,
    /// Particles scattered.
    Dispersed,
}

/// Ephemeral camera motion, recomputed every frame and never persisted.
/// Level-triggered: held as long as the thumbs gesture stays confirmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraCommand {
    Forward,
    Backward,
    Idle,
}

/// One-shot photo-panel navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoStep {
    Next,
    Prev,
}

/// Raw palm-center passthrough for camera rotate targeting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPosition {
    pub x: f32,
    pub y: f32,
    pub detected: bool,
}

impl HandPosition {
    /// Neutral center position reported while no hand is visible.
    pub const NONE: HandPosition = HandPosition { x: 0.5, y: 0.5, detected: false };
}

/// Everything the rendering/camera layer consumes for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub mode: SceneMode,
    /// True only on the frame the mode flipped (edge), while `mode` itself
    /// is level-triggered.
    pub mode_changed: bool,
    pub camera: CameraCommand,
    pub hand: HandPosition,
    pub two_hands: bool,
    /// The currently confirmed gesture, if any — for status display. Set
    /// even when a cooldown suppressed the associated action.
    pub confirmed: Option<GestureLabel>,
    pub photo_step: Option<PhotoStep>,
    pub snow_toggled: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// GesturePipeline
// ════════════════════════════════════════════════════════════════════════════

/// Per-session pipeline state: the scene mode plus the debounce counters.
#[derive(Clone, Debug)]
pub struct GesturePipeline {
    mode: SceneMode,
    debounce: DebounceState,
}

impl Default for GesturePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl GesturePipeline {
    /// The tree starts assembled; an open hand disperses it.
    pub fn new() -> Self {
        GesturePipeline {
            mode: SceneMode::Assembled,
            debounce: DebounceState::new(),
        }
    }

    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Set the scene mode, returning true if it actually flipped.
    ///
    /// Also serves as the host-side override for pointer control when
    /// gesture input is unavailable; going through the pipeline keeps the
    /// edge-trigger baseline in sync so a later confirmed gesture does not
    /// re-fire a transition into the same mode.
    pub fn set_mode(&mut self, mode: SceneMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Process one frame of hand observations.
    ///
    /// `now` is the caller's wall-clock sample for this frame; it is only
    /// compared against the cooldown timestamps, never slept on.
    pub fn process(&mut self, hands: &[HandObservation], now: Instant) -> FrameOutput {
        let features: Vec<HandFeatures> = hands.iter().map(HandFeatures::extract).collect();

        let hand = match features.first() {
            Some(lead) => HandPosition {
                x: lead.palm_center.x,
                y: lead.palm_center.y,
                detected: true,
            },
            None => HandPosition::NONE,
        };

        let label = classify(&features);
        self.debounce.observe(label, !hands.is_empty());

        let confirmed = label.filter(|&l| self.debounce.is_confirmed(l));

        let mut out = FrameOutput {
            mode: self.mode,
            mode_changed: false,
            camera: CameraCommand::Idle,
            hand,
            two_hands: hands.len() >= 2,
            confirmed,
            photo_step: None,
            snow_toggled: false,
        };

        let Some(gesture) = confirmed else {
            return out;
        };

        match gesture {
            // Edge-triggered mode flips, idempotent against repeated
            // confirmation of the same gesture.
            GestureLabel::OpenHand => out.mode_changed = self.set_mode(SceneMode::Dispersed),
            GestureLabel::ClosedFist => out.mode_changed = self.set_mode(SceneMode::Assembled),

            // Held camera motion: re-fires every frame past the threshold.
            GestureLabel::ThumbsUp => out.camera = CameraCommand::Forward,
            GestureLabel::ThumbsDown => out.camera = CameraCommand::Backward,

            // One-shots behind their cooldown gates.
            GestureLabel::PinchLeft => {
                if self.debounce.try_fire_photo(gesture, now) {
                    out.photo_step = Some(PhotoStep::Prev);
                }
            }
            GestureLabel::PinchRight => {
                if self.debounce.try_fire_photo(gesture, now) {
                    out.photo_step = Some(PhotoStep::Next);
                }
            }
            GestureLabel::Victory => out.snow_toggled = self.debounce.try_fire_snow(now),
        }

        out.mode = self.mode;
        out
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::{PHOTO_COOLDOWN, SNOW_COOLDOWN};
    use hand_track::{poses, HandObservation, Point2};
    use std::time::Duration;

    const AT: Point2 = Point2 { x: 0.45, y: 0.5 };
    const LEFT_SIDE: Point2 = Point2 { x: 0.75, y: 0.5 };
    const RIGHT_SIDE: Point2 = Point2 { x: 0.25, y: 0.5 };

    /// Feed the same observation list for `frames` frames, returning the
    /// last output.
    fn feed(
        p: &mut GesturePipeline,
        hands: &[HandObservation],
        frames: usize,
        now: Instant,
    ) -> FrameOutput {
        let mut last = None;
        for _ in 0..frames {
            last = Some(p.process(hands, now));
        }
        last.expect("at least one frame")
    }

    #[test]
    fn open_hand_disperses_after_six_frames_not_five() {
        let mut p = GesturePipeline::new();
        let open = [poses::open_hand(AT)];
        let now = Instant::now();

        let out = feed(&mut p, &open, 5, now);
        assert_eq!(out.mode, SceneMode::Assembled);
        assert!(out.confirmed.is_none());

        let out = p.process(&open, now);
        assert_eq!(out.mode, SceneMode::Dispersed);
        assert!(out.mode_changed);
        assert_eq!(out.confirmed, Some(GestureLabel::OpenHand));
    }

    #[test]
    fn open_then_fist_walks_the_mode_both_ways() {
        let mut p = GesturePipeline::new();
        let now = Instant::now();

        let out = feed(&mut p, &[poses::open_hand(AT)], 6, now);
        assert_eq!(out.mode, SceneMode::Dispersed);

        let out = feed(&mut p, &[poses::closed_fist(AT)], 6, now);
        assert_eq!(out.mode, SceneMode::Assembled);
        assert!(out.mode_changed);
    }

    #[test]
    fn repeated_confirmation_changes_mode_exactly_once() {
        let mut p = GesturePipeline::new();
        let open = [poses::open_hand(AT)];
        let now = Instant::now();

        feed(&mut p, &open, 6, now);
        let mut edges = 0;
        for _ in 0..10 {
            if p.process(&open, now).mode_changed {
                edges += 1;
            }
        }
        assert_eq!(edges, 0, "held open hand must not re-fire the edge");
    }

    #[test]
    fn thumbs_up_holds_the_camera_forward() {
        let mut p = GesturePipeline::new();
        let up = [poses::thumbs_up(AT)];
        let now = Instant::now();

        assert_eq!(feed(&mut p, &up, 5, now).camera, CameraCommand::Idle);
        // Level-triggered past the threshold: every subsequent frame.
        for _ in 0..4 {
            assert_eq!(p.process(&up, now).camera, CameraCommand::Forward);
        }
        // Hand loss clears the command immediately.
        assert_eq!(p.process(&[], now).camera, CameraCommand::Idle);
    }

    #[test]
    fn thumbs_down_dollies_backward() {
        let mut p = GesturePipeline::new();
        let out = feed(&mut p, &[poses::thumbs_down(AT)], 6, Instant::now());
        assert_eq!(out.camera, CameraCommand::Backward);
    }

    #[test]
    fn pinch_steps_the_photo_once_per_streak() {
        let mut p = GesturePipeline::new();
        let pinch = [poses::pinch(RIGHT_SIDE)];
        let now = Instant::now();

        let out = feed(&mut p, &pinch, 6, now);
        assert_eq!(out.photo_step, Some(PhotoStep::Next));

        // Counter was consumed: the very next frame has no action even
        // though the pose is unchanged.
        assert_eq!(p.process(&pinch, now).photo_step, None);
    }

    #[test]
    fn photo_cooldown_suppresses_the_second_fire() {
        let mut p = GesturePipeline::new();
        let pinch = [poses::pinch(LEFT_SIDE)];
        let t0 = Instant::now();

        assert_eq!(feed(&mut p, &pinch, 6, t0).photo_step, Some(PhotoStep::Prev));

        // A fresh 6-frame streak inside the 500 ms window: confirmed for
        // display, action suppressed.
        let out = feed(&mut p, &pinch, 6, t0 + Duration::from_millis(200));
        assert_eq!(out.photo_step, None);
        assert_eq!(out.confirmed, Some(GestureLabel::PinchLeft));

        // Once the window passes the still-held streak fires.
        let out = p.process(&pinch, t0 + PHOTO_COOLDOWN);
        assert_eq!(out.photo_step, Some(PhotoStep::Prev));
    }

    #[test]
    fn snow_toggle_is_rate_limited_to_two_seconds() {
        let mut p = GesturePipeline::new();
        let v = [poses::victory(AT)];
        let t0 = Instant::now();

        assert!(feed(&mut p, &v, 6, t0).snow_toggled);
        assert!(!feed(&mut p, &v, 6, t0 + Duration::from_millis(1500)).snow_toggled);
        assert!(p.process(&v, t0 + SNOW_COOLDOWN).snow_toggled);
    }

    #[test]
    fn dropout_frame_keeps_a_confirmed_streak_alive() {
        let mut p = GesturePipeline::new();
        let open = [poses::open_hand(AT)];
        let now = Instant::now();

        feed(&mut p, &open, 7, now);
        // One empty frame: decay, not reset.
        let out = p.process(&[], now);
        assert!(!out.hand.detected);
        assert_eq!((out.hand.x, out.hand.y), (0.5, 0.5));
        // Streak resumes immediately on the next detection.
        let out = p.process(&open, now);
        assert_eq!(out.confirmed, Some(GestureLabel::OpenHand));
    }

    #[test]
    fn two_hand_pinch_dispatches_the_left_action() {
        let mut p = GesturePipeline::new();
        let both = [poses::pinch(RIGHT_SIDE), poses::pinch(LEFT_SIDE)];
        let now = Instant::now();

        let out = feed(&mut p, &both, 6, now);
        assert!(out.two_hands);
        assert_eq!(out.photo_step, Some(PhotoStep::Prev));
    }

    #[test]
    fn hand_position_tracks_the_lead_palm() {
        let mut p = GesturePipeline::new();
        let out = p.process(&[poses::open_hand(Point2::new(0.3, 0.6))], Instant::now());
        assert!(out.hand.detected);
        assert!((out.hand.x - 0.3).abs() < 0.02);
        assert!(!out.two_hands);
    }
}
