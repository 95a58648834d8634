//! # hand_track
//!
//! Data model and geometric feature extraction for webcam hand-landmark
//! detections.
//!
//! A detector (an external collaborator — e.g. a MediaPipe-style model)
//! produces, once per video frame, zero or more hands, each an ordered
//! sequence of exactly 21 keypoints in normalized image coordinates.
//! This crate turns one such hand into the scalar/boolean features the
//! gesture layer classifies on:
//!
//! | Feature | Definition |
//! |---|---|
//! | palm center | mean of wrist + 4 non-thumb knuckles |
//! | finger extended | tip-to-wrist > 1.5 × knuckle-to-wrist |
//! | thumb extended | tip-to-wrist > 1.2 × thumb-MCP-to-wrist |
//! | pinch distance | thumb tip ↔ index tip |
//! | thumb direction | tip y vs MCP y with a 0.05 margin |
//!
//! Observations carry no identity across frames: a hand is valid only for
//! the frame it was produced in.

pub mod features;
pub mod poses;

pub use features::{HandFeatures, ThumbDirection};

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

/// A 2D point in normalized image coordinates ([0,1] × [0,1], y downward).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Point2 { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of keypoints per hand. A conforming detector always supplies
/// exactly this many; anything else is rejected at the boundary.
pub const LANDMARK_COUNT: usize = 21;

/// Indices into the 21-point landmark array (standard hand-skeleton order:
/// wrist, then four joints per digit from thumb to pinky).
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_TIP: usize = 20;
}

/// Handedness label reported by the detector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// One hand as seen in one frame: 21 ordered keypoints plus handedness.
///
/// No identity persists across frames — hands are not tracked or
/// re-associated, so "first hand in the detection list" is the only
/// cross-frame-stable reference.
#[derive(Clone, Debug, PartialEq)]
pub struct HandObservation {
    pub landmarks: [Point2; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandObservation {
    pub fn new(landmarks: [Point2; LANDMARK_COUNT], handedness: Handedness) -> Self {
        HandObservation { landmarks, handedness }
    }

    /// Build an observation from a detector's raw point slice.
    ///
    /// Returns `None` on a landmark-count mismatch so a malformed frame can
    /// be skipped without crashing the polling loop.
    pub fn from_slice(points: &[Point2], handedness: Handedness) -> Option<Self> {
        let landmarks: [Point2; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(HandObservation { landmarks, handedness })
    }

    pub fn wrist(&self) -> Point2 {
        self.landmarks[landmark::WRIST]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.3, 0.4);
        assert!((a.distance(b) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn from_slice_accepts_exactly_21_points() {
        let pts = vec![Point2::default(); LANDMARK_COUNT];
        assert!(HandObservation::from_slice(&pts, Handedness::Right).is_some());
    }

    #[test]
    fn from_slice_rejects_wrong_count() {
        let short = vec![Point2::default(); LANDMARK_COUNT - 1];
        let long = vec![Point2::default(); LANDMARK_COUNT + 3];
        assert!(HandObservation::from_slice(&short, Handedness::Left).is_none());
        assert!(HandObservation::from_slice(&long, Handedness::Left).is_none());
    }
}
