//! Canonical synthetic hand poses.
//!
//! Deterministic 21-point observations for each recognizable hand shape,
//! positioned around a requested palm point. The keyboard simulator feeds
//! these through the real extractor/classifier path, and the workspace
//! tests build their fixtures from them.
//!
//! Geometry is laid out in normalized image coordinates (y downward) around
//! a center `c`: wrist 0.15 below, knuckle row at `c`, extended fingertips
//! 0.12 above, curled fingertips 0.05 below. Each placement clears its
//! extractor threshold with room to spare rather than sitting on the
//! boundary.

use crate::{landmark, HandObservation, Handedness, Point2, LANDMARK_COUNT};

/// Mirrored-preview convention: a palm right of the image midline is the
/// user's left hand. Matches the classifier's dispatch convention.
fn handedness_for(at: Point2) -> Handedness {
    if at.x > 0.5 {
        Handedness::Left
    } else {
        Handedness::Right
    }
}

/// Offsets of the four non-thumb knuckles from the pose center.
const FINGER_MCP_DX: [f32; 4] = [-0.06, -0.02, 0.02, 0.06];

struct PoseBuilder {
    lm: [Point2; LANDMARK_COUNT],
    c: Point2,
}

impl PoseBuilder {
    fn new(c: Point2) -> Self {
        let mut lm = [Point2::default(); LANDMARK_COUNT];
        lm[landmark::WRIST] = Point2::new(c.x, c.y + 0.15);
        // Knuckle row
        for (i, dx) in FINGER_MCP_DX.iter().enumerate() {
            lm[landmark::INDEX_MCP + i * 4] = Point2::new(c.x + dx, c.y);
        }
        // Thumb column (CMC, MCP); IP and tip are set per pose.
        lm[1] = Point2::new(c.x - 0.08, c.y + 0.12);
        lm[landmark::THUMB_MCP] = Point2::new(c.x - 0.10, c.y + 0.08);
        PoseBuilder { lm, c }
    }

    /// Set finger `i` (0 = index … 3 = pinky) extended or curled, filling
    /// the intermediate PIP/DIP joints by interpolation.
    fn finger(mut self, i: usize, extended: bool) -> Self {
        let mcp = landmark::INDEX_MCP + i * 4;
        let tip_y = if extended { self.c.y - 0.12 } else { self.c.y + 0.05 };
        let tip = Point2::new(self.lm[mcp].x, tip_y);
        self.lm[mcp + 3] = tip;
        self.lm[mcp + 1] = lerp(self.lm[mcp], tip, 1.0 / 3.0);
        self.lm[mcp + 2] = lerp(self.lm[mcp], tip, 2.0 / 3.0);
        self
    }

    fn fingers(mut self, extended: [bool; 4]) -> Self {
        for (i, &e) in extended.iter().enumerate() {
            self = self.finger(i, e);
        }
        self
    }

    /// Place the thumb tip at an absolute offset from the pose center.
    fn thumb_tip_at(mut self, dx: f32, dy: f32) -> Self {
        let tip = Point2::new(self.c.x + dx, self.c.y + dy);
        self.lm[landmark::THUMB_TIP] = tip;
        self.lm[3] = lerp(self.lm[landmark::THUMB_MCP], tip, 0.5);
        self
    }

    /// Replace one fingertip outright (the pinch pose puts the index tip
    /// against the thumb instead of on the curled row).
    fn finger_tip_override(mut self, i: usize, tip: Point2) -> Self {
        let mcp = landmark::INDEX_MCP + i * 4;
        self.lm[mcp + 3] = tip;
        self.lm[mcp + 1] = lerp(self.lm[mcp], tip, 1.0 / 3.0);
        self.lm[mcp + 2] = lerp(self.lm[mcp], tip, 2.0 / 3.0);
        self
    }

    fn build(self) -> HandObservation {
        HandObservation::new(self.lm, handedness_for(self.c))
    }
}

fn lerp(a: Point2, b: Point2, t: f32) -> Point2 {
    Point2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

// ════════════════════════════════════════════════════════════════════════════
// Pose builders
// ════════════════════════════════════════════════════════════════════════════

/// All five digits extended.
pub fn open_hand(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([true, true, true, true])
        .thumb_tip_at(-0.14, -0.02)
        .build()
}

/// All digits curled; thumb tucked clear of the index tip so the pinch
/// test cannot fire first.
pub fn closed_fist(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([false, false, false, false])
        .thumb_tip_at(-0.12, 0.11)
        .build()
}

/// Thumb tip brought onto the index tip (gap 0.03 < the 0.05 cutoff).
pub fn pinch(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([false, false, false, false])
        .thumb_tip_at(-0.06, -0.04)
        .finger_tip_override(0, Point2::new(at.x - 0.06, at.y - 0.01))
        .build()
}

/// Thumb extended past the vertical margin, fingers curled.
pub fn thumbs_up(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([false, false, false, false])
        .thumb_tip_at(-0.12, -0.06)
        .build()
}

/// Thumb extended downward past the vertical margin, fingers curled.
pub fn thumbs_down(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([false, false, false, false])
        .thumb_tip_at(-0.16, 0.26)
        .build()
}

/// Index and middle extended, ring and pinky curled, thumb tucked.
pub fn victory(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([true, true, false, false])
        .thumb_tip_at(-0.12, 0.11)
        .build()
}

/// Three fingers extended with the thumb tucked — matches no gesture rule.
pub fn unrecognized(at: Point2) -> HandObservation {
    PoseBuilder::new(at)
        .fingers([true, true, true, false])
        .thumb_tip_at(-0.12, 0.11)
        .build()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HandFeatures;

    #[test]
    fn handedness_follows_mirrored_midline() {
        assert_eq!(open_hand(Point2::new(0.7, 0.5)).handedness, Handedness::Left);
        assert_eq!(open_hand(Point2::new(0.3, 0.5)).handedness, Handedness::Right);
    }

    #[test]
    fn palm_center_lands_near_the_requested_point() {
        let at = Point2::new(0.42, 0.58);
        let f = HandFeatures::extract(&open_hand(at));
        assert!((f.palm_center.x - at.x).abs() < 0.02);
        assert!((f.palm_center.y - at.y).abs() < 0.05);
    }

    #[test]
    fn unrecognized_pose_matches_no_shape() {
        let f = HandFeatures::extract(&unrecognized(Point2::new(0.5, 0.5)));
        assert_eq!(f.extended_finger_count(), 3);
        assert!(!f.thumb_extended);
        assert!(f.pinch_distance >= 0.05);
    }

    #[test]
    fn fist_keeps_thumb_clear_of_the_pinch_cutoff() {
        let f = HandFeatures::extract(&closed_fist(Point2::new(0.5, 0.5)));
        assert!(f.pinch_distance >= 0.05, "gap was {}", f.pinch_distance);
    }
}
