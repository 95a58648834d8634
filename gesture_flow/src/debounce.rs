//! Temporal debouncing of the per-frame gesture stream.
//!
//! One consecutive-frame counter per label: seeing a label bumps its
//! counter and zeroes every other one; a frame with no hands at all decays
//! every counter by one instead of resetting, so a single-frame detector
//! dropout does not cost an in-progress streak. A gesture is *confirmed*
//! once its counter strictly exceeds [`CONFIRM_FRAMES`].
//!
//! The one-shot actions (photo step, snow toggle) are additionally gated by
//! wall-clock cooldowns. Time is always supplied by the caller — the state
//! never reads a clock — which keeps the debouncer deterministic under test.

use std::time::{Duration, Instant};

use crate::classify::GestureLabel;

/// A label must be seen on more than this many consecutive frames before it
/// confirms (i.e. the sixth identical frame is the first that can act).
pub const CONFIRM_FRAMES: u32 = 5;

/// Minimum interval between photo-step actions (pinch).
pub const PHOTO_COOLDOWN: Duration = Duration::from_millis(500);

/// Minimum interval between snow toggles (victory).
pub const SNOW_COOLDOWN: Duration = Duration::from_millis(2000);

/// Debounce counters and cooldown timestamps for one detection session.
///
/// An explicit value threaded through each frame call; torn down with the
/// session. Nothing here is global.
#[derive(Clone, Debug, Default)]
pub struct DebounceState {
    counters: [u32; GestureLabel::ALL.len()],
    last_photo_action: Option<Instant>,
    last_snow_toggle: Option<Instant>,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's classification result.
    ///
    /// `Some(label)` increments that label's counter and hard-resets all
    /// others; `None` with no hands seen decays every counter by one.
    pub fn observe(&mut self, label: Option<GestureLabel>, any_hand_seen: bool) {
        match label {
            Some(label) => {
                let idx = label.index();
                for (i, c) in self.counters.iter_mut().enumerate() {
                    if i == idx {
                        *c += 1;
                    } else {
                        *c = 0;
                    }
                }
            }
            None if any_hand_seen => {
                // A hand is visible but matches nothing: a genuinely
                // different observation, so streaks end here.
                self.counters = Default::default();
            }
            None => {
                // Total hand loss: tolerate a dropout frame.
                for c in self.counters.iter_mut() {
                    *c = c.saturating_sub(1);
                }
            }
        }
    }

    pub fn count(&self, label: GestureLabel) -> u32 {
        self.counters[label.index()]
    }

    /// Whether the label has survived long enough to act on.
    pub fn is_confirmed(&self, label: GestureLabel) -> bool {
        self.count(label) > CONFIRM_FRAMES
    }

    /// One-shot labels re-arm by restarting their streak from zero.
    pub fn reset_counter(&mut self, label: GestureLabel) {
        self.counters[label.index()] = 0;
    }

    pub fn photo_gate_open(&self, now: Instant) -> bool {
        gate_open(self.last_photo_action, now, PHOTO_COOLDOWN)
    }

    pub fn snow_gate_open(&self, now: Instant) -> bool {
        gate_open(self.last_snow_toggle, now, SNOW_COOLDOWN)
    }

    /// Fire a photo-step action if its cooldown allows, consuming the
    /// streak on success. A closed gate leaves the counter intact so the
    /// action fires the moment the gate reopens while the pinch is held.
    pub fn try_fire_photo(&mut self, label: GestureLabel, now: Instant) -> bool {
        if !self.photo_gate_open(now) {
            return false;
        }
        self.last_photo_action = Some(now);
        self.reset_counter(label);
        true
    }

    /// Fire a snow toggle if its cooldown allows; same contract as
    /// [`Self::try_fire_photo`].
    pub fn try_fire_snow(&mut self, now: Instant) -> bool {
        if !self.snow_gate_open(now) {
            return false;
        }
        self.last_snow_toggle = Some(now);
        self.reset_counter(GestureLabel::Victory);
        true
    }
}

fn gate_open(last: Option<Instant>, now: Instant, cooldown: Duration) -> bool {
    match last {
        Some(t) => now.duration_since(t) >= cooldown,
        None => true,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: GestureLabel = GestureLabel::OpenHand;
    const FIST: GestureLabel = GestureLabel::ClosedFist;

    #[test]
    fn five_frames_do_not_confirm_six_do() {
        let mut st = DebounceState::new();
        for _ in 0..5 {
            st.observe(Some(OPEN), true);
        }
        assert!(!st.is_confirmed(OPEN), "5 frames must not confirm");
        st.observe(Some(OPEN), true);
        assert!(st.is_confirmed(OPEN), "6th frame confirms");
    }

    #[test]
    fn a_different_label_resets_the_streak() {
        let mut st = DebounceState::new();
        for _ in 0..4 {
            st.observe(Some(OPEN), true);
        }
        st.observe(Some(FIST), true);
        assert_eq!(st.count(OPEN), 0);
        assert_eq!(st.count(FIST), 1);
    }

    #[test]
    fn an_unrecognized_hand_resets_all_streaks() {
        let mut st = DebounceState::new();
        for _ in 0..7 {
            st.observe(Some(OPEN), true);
        }
        st.observe(None, true);
        assert_eq!(st.count(OPEN), 0);
    }

    #[test]
    fn hand_loss_decays_instead_of_resetting() {
        let mut st = DebounceState::new();
        for _ in 0..7 {
            st.observe(Some(OPEN), true);
        }
        st.observe(None, false);
        assert_eq!(st.count(OPEN), 6);
        assert!(st.is_confirmed(OPEN), "streak survives a dropout frame");
        st.observe(Some(OPEN), true);
        assert_eq!(st.count(OPEN), 7);
    }

    #[test]
    fn decay_saturates_at_zero() {
        let mut st = DebounceState::new();
        st.observe(None, false);
        assert_eq!(st.count(OPEN), 0);
    }

    #[test]
    fn photo_gate_enforces_the_cooldown() {
        let mut st = DebounceState::new();
        let t0 = Instant::now();
        assert!(st.try_fire_photo(GestureLabel::PinchRight, t0));
        // Inside the window: suppressed.
        assert!(!st.try_fire_photo(GestureLabel::PinchRight, t0 + Duration::from_millis(499)));
        // At the boundary: fires again.
        assert!(st.try_fire_photo(GestureLabel::PinchRight, t0 + PHOTO_COOLDOWN));
    }

    #[test]
    fn snow_gate_enforces_two_seconds() {
        let mut st = DebounceState::new();
        let t0 = Instant::now();
        assert!(st.try_fire_snow(t0));
        assert!(!st.try_fire_snow(t0 + Duration::from_millis(1999)));
        assert!(st.try_fire_snow(t0 + SNOW_COOLDOWN));
    }

    #[test]
    fn firing_consumes_the_streak_a_closed_gate_does_not() {
        let mut st = DebounceState::new();
        let t0 = Instant::now();
        for _ in 0..6 {
            st.observe(Some(GestureLabel::Victory), true);
        }
        assert!(st.try_fire_snow(t0));
        assert_eq!(st.count(GestureLabel::Victory), 0);

        // Re-held within the cooldown: confirmed but not fired, and the
        // counter keeps the streak for when the gate reopens.
        for _ in 0..6 {
            st.observe(Some(GestureLabel::Victory), true);
        }
        assert!(st.is_confirmed(GestureLabel::Victory));
        assert!(!st.try_fire_snow(t0 + Duration::from_millis(100)));
        assert_eq!(st.count(GestureLabel::Victory), 6);
    }
}
