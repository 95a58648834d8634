//! Per-frame gesture classification.
//!
//! Exactly one label (or none) per frame. Mutual exclusivity comes from
//! priority ordering, not geometric disjointness — a pinching hand with the
//! thumb raised is still a pinch because rule 1 runs first.

use hand_track::{HandFeatures, ThumbDirection};

/// Thumb-tip-to-index-tip distance (normalized units) below which a hand
/// counts as pinching.
pub const PINCH_MAX_DISTANCE: f32 = 0.05;

/// Midline of the mirrored front-camera preview. A palm right of this is
/// the user's *left* hand (the feed is flipped for the self-view).
pub const MIRROR_MIDLINE_X: f32 = 0.5;

/// The closed set of recognizable gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureLabel {
    OpenHand,
    ClosedFist,
    PinchLeft,
    PinchRight,
    ThumbsUp,
    ThumbsDown,
    Victory,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 7] = [
        GestureLabel::OpenHand,
        GestureLabel::ClosedFist,
        GestureLabel::PinchLeft,
        GestureLabel::PinchRight,
        GestureLabel::ThumbsUp,
        GestureLabel::ThumbsDown,
        GestureLabel::Victory,
    ];

    /// Dense index for per-label counter arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            GestureLabel::OpenHand => 0,
            GestureLabel::ClosedFist => 1,
            GestureLabel::PinchLeft => 2,
            GestureLabel::PinchRight => 3,
            GestureLabel::ThumbsUp => 4,
            GestureLabel::ThumbsDown => 5,
            GestureLabel::Victory => 6,
        }
    }

    /// Short name for status lines.
    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::OpenHand => "open-hand",
            GestureLabel::ClosedFist => "closed-fist",
            GestureLabel::PinchLeft => "pinch-left",
            GestureLabel::PinchRight => "pinch-right",
            GestureLabel::ThumbsUp => "thumbs-up",
            GestureLabel::ThumbsDown => "thumbs-down",
            GestureLabel::Victory => "victory",
        }
    }
}

/// Classify one frame's hands. First match wins:
///
/// 1. pinch on *any* hand (side from the mirrored midline, left side wins
///    a simultaneous two-hand pinch),
/// 2. thumbs-up / thumbs-down,
/// 3. victory,
/// 4. open hand,
/// 5. closed fist.
///
/// Rules 2–5 read only the first detected hand; scanning every hand for a
/// pinch while everything else follows the lead hand is a deliberate
/// asymmetry of the control scheme.
pub fn classify(hands: &[HandFeatures]) -> Option<GestureLabel> {
    let mut pinch_left = false;
    let mut pinch_right = false;
    for hand in hands {
        if hand.pinch_distance < PINCH_MAX_DISTANCE {
            if hand.palm_center.x > MIRROR_MIDLINE_X {
                pinch_left = true;
            } else {
                pinch_right = true;
            }
        }
    }
    if pinch_left {
        return Some(GestureLabel::PinchLeft);
    }
    if pinch_right {
        return Some(GestureLabel::PinchRight);
    }

    let lead = hands.first()?;
    let no_fingers = lead.extended_finger_count() == 0;

    if lead.thumb_extended && no_fingers {
        match lead.thumb_direction {
            ThumbDirection::Up => return Some(GestureLabel::ThumbsUp),
            ThumbDirection::Down => return Some(GestureLabel::ThumbsDown),
            ThumbDirection::Level => {}
        }
    }

    if lead.fingers_extended == [true, true, false, false] && !lead.thumb_extended {
        return Some(GestureLabel::Victory);
    }

    if lead.extended_digit_count() >= 4 {
        return Some(GestureLabel::OpenHand);
    }

    if lead.extended_finger_count() <= 1 && !lead.thumb_extended {
        return Some(GestureLabel::ClosedFist);
    }

    None
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_track::{poses, HandFeatures, Point2};

    fn feats(hands: &[hand_track::HandObservation]) -> Vec<HandFeatures> {
        hands.iter().map(HandFeatures::extract).collect()
    }

    const LEFT_SIDE: Point2 = Point2 { x: 0.75, y: 0.5 };
    const RIGHT_SIDE: Point2 = Point2 { x: 0.25, y: 0.5 };
    const CENTERISH: Point2 = Point2 { x: 0.45, y: 0.5 };

    #[test]
    fn each_pose_maps_to_its_label() {
        let cases = [
            (poses::open_hand(CENTERISH), GestureLabel::OpenHand),
            (poses::closed_fist(CENTERISH), GestureLabel::ClosedFist),
            (poses::thumbs_up(CENTERISH), GestureLabel::ThumbsUp),
            (poses::thumbs_down(CENTERISH), GestureLabel::ThumbsDown),
            (poses::victory(CENTERISH), GestureLabel::Victory),
            (poses::pinch(RIGHT_SIDE), GestureLabel::PinchRight),
            (poses::pinch(LEFT_SIDE), GestureLabel::PinchLeft),
        ];
        for (pose, expected) in cases {
            assert_eq!(classify(&feats(&[pose])), Some(expected));
        }
    }

    #[test]
    fn unrecognized_pose_yields_none() {
        assert_eq!(classify(&feats(&[poses::unrecognized(CENTERISH)])), None);
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn pinch_wins_regardless_of_finger_state() {
        // An open hand whose thumb/index gap is forced shut must classify
        // as pinch, not open-hand.
        let mut open = poses::open_hand(RIGHT_SIDE);
        let index_tip = open.landmarks[hand_track::landmark::INDEX_TIP];
        open.landmarks[hand_track::landmark::THUMB_TIP] =
            Point2::new(index_tip.x + 0.02, index_tip.y);
        let f = HandFeatures::extract(&open);
        assert!(f.pinch_distance < PINCH_MAX_DISTANCE);
        assert_eq!(classify(&[f]), Some(GestureLabel::PinchRight));
    }

    #[test]
    fn pinch_side_follows_the_mirrored_midline() {
        // Palm right of the midline ⇒ the user's left hand.
        assert_eq!(
            classify(&feats(&[poses::pinch(Point2::new(0.51, 0.5))])),
            Some(GestureLabel::PinchLeft)
        );
        assert_eq!(
            classify(&feats(&[poses::pinch(Point2::new(0.49, 0.5))])),
            Some(GestureLabel::PinchRight)
        );
    }

    #[test]
    fn simultaneous_two_hand_pinch_prefers_the_left() {
        let both = [poses::pinch(RIGHT_SIDE), poses::pinch(LEFT_SIDE)];
        assert_eq!(classify(&feats(&both)), Some(GestureLabel::PinchLeft));
        // Order of the detection list must not matter.
        let both = [poses::pinch(LEFT_SIDE), poses::pinch(RIGHT_SIDE)];
        assert_eq!(classify(&feats(&both)), Some(GestureLabel::PinchLeft));
    }

    #[test]
    fn pinch_scans_beyond_the_first_hand() {
        // Lead hand is a plain fist; the second hand pinches.
        let hands = [poses::closed_fist(RIGHT_SIDE), poses::pinch(LEFT_SIDE)];
        assert_eq!(classify(&feats(&hands)), Some(GestureLabel::PinchLeft));
    }

    #[test]
    fn only_the_first_hand_drives_shape_gestures() {
        // Lead hand unrecognized, second hand thumbs-up: no label, because
        // rules 2–5 never look past the lead hand.
        let hands = [poses::unrecognized(RIGHT_SIDE), poses::thumbs_up(LEFT_SIDE)];
        assert_eq!(classify(&feats(&hands)), None);
    }
}
