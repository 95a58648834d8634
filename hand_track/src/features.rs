//! Per-hand geometric feature extraction.
//!
//! Pure functions of a single frame's landmarks — no state carries over
//! between frames. The ratio and margin constants are tuned against the
//! front-camera preview and are load-bearing: the classifier's behaviour
//! depends on them exactly as written.

use crate::{landmark, HandObservation, Point2};

// ════════════════════════════════════════════════════════════════════════════
// Tuned thresholds
// ════════════════════════════════════════════════════════════════════════════

/// A non-thumb finger counts as extended when its tip is this many times
/// farther from the wrist than its knuckle is. Boundary exclusive.
pub const FINGER_EXTENDED_RATIO: f32 = 1.5;

/// Thumb extension ratio (tip vs thumb MCP, both measured from the wrist).
pub const THUMB_EXTENDED_RATIO: f32 = 1.2;

/// Vertical margin (normalized units) before the thumb reads as pointing
/// up or down rather than level.
pub const THUMB_VERTICAL_MARGIN: f32 = 0.05;

// ════════════════════════════════════════════════════════════════════════════
// Feature set
// ════════════════════════════════════════════════════════════════════════════

/// Vertical orientation of the thumb, from tip-vs-MCP y comparison.
/// Image y grows downward, so a tip above its base reads as `Up`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThumbDirection {
    Up,
    Down,
    Level,
}

/// Scalar/boolean features derived from one hand in one frame.
#[derive(Clone, Debug)]
pub struct HandFeatures {
    /// Mean of the wrist and the four non-thumb knuckles.
    pub palm_center: Point2,
    /// Extension flags in index, middle, ring, pinky order.
    pub fingers_extended: [bool; 4],
    pub thumb_extended: bool,
    /// Thumb tip ↔ index tip distance (normalized coordinates).
    pub pinch_distance: f32,
    pub thumb_direction: ThumbDirection,
}

impl HandFeatures {
    /// Extract the full feature set from one observation.
    pub fn extract(hand: &HandObservation) -> Self {
        let lm = &hand.landmarks;
        let wrist = lm[landmark::WRIST];

        let palm_center = centroid(&[
            wrist,
            lm[landmark::INDEX_MCP],
            lm[landmark::MIDDLE_MCP],
            lm[landmark::RING_MCP],
            lm[landmark::PINKY_MCP],
        ]);

        let finger = |tip: usize, mcp: usize| -> bool {
            lm[tip].distance(wrist) > FINGER_EXTENDED_RATIO * lm[mcp].distance(wrist)
        };
        let fingers_extended = [
            finger(landmark::INDEX_TIP, landmark::INDEX_MCP),
            finger(landmark::MIDDLE_TIP, landmark::MIDDLE_MCP),
            finger(landmark::RING_TIP, landmark::RING_MCP),
            finger(landmark::PINKY_TIP, landmark::PINKY_MCP),
        ];

        let thumb_tip = lm[landmark::THUMB_TIP];
        let thumb_mcp = lm[landmark::THUMB_MCP];
        let thumb_extended =
            thumb_tip.distance(wrist) > THUMB_EXTENDED_RATIO * thumb_mcp.distance(wrist);

        let pinch_distance = thumb_tip.distance(lm[landmark::INDEX_TIP]);

        let thumb_direction = if thumb_tip.y < thumb_mcp.y - THUMB_VERTICAL_MARGIN {
            ThumbDirection::Up
        } else if thumb_tip.y > thumb_mcp.y + THUMB_VERTICAL_MARGIN {
            ThumbDirection::Down
        } else {
            ThumbDirection::Level
        };

        HandFeatures {
            palm_center,
            fingers_extended,
            thumb_extended,
            pinch_distance,
            thumb_direction,
        }
    }

    /// Number of extended non-thumb fingers (0–4).
    pub fn extended_finger_count(&self) -> usize {
        self.fingers_extended.iter().filter(|&&e| e).count()
    }

    /// Number of extended digits including the thumb (0–5).
    pub fn extended_digit_count(&self) -> usize {
        self.extended_finger_count() + usize::from(self.thumb_extended)
    }
}

fn centroid(points: &[Point2]) -> Point2 {
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
