//! Landmark frame sources.
//!
//! The public interface is [`LandmarkFrame`] delivered over a `mpsc`
//! channel, one per video frame. Consumers don't need to know whether
//! frames came from a real webcam detector or the keyboard simulator —
//! the pipeline downstream is identical either way.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_track::{poses, HandObservation, Point2};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

/// One video frame's detections: zero or more hands, in detector order.
/// The first entry is the "lead" hand for shape gestures.
#[derive(Clone, Debug, Default)]
pub struct LandmarkFrame {
    pub hands: Vec<HandObservation>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for detector and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`LandmarkFrame`]s over a channel.
///
/// A real webcam + hand-landmark model lives behind this seam; the crate
/// ships only the simulator, since the detector is an external capability.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<LandmarkFrame>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
///
/// The thread exits when either side of the channel is dropped, so tearing
/// down the receiver tears down the source.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<LandmarkFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Hand shape currently held on the simulator keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Open,
    Fist,
    PinchLeft,
    PinchRight,
    /// Both hands pinching at once, one per side.
    BothPinch,
    ThumbsUp,
    ThumbsDown,
    Victory,
    /// A visible hand matching no gesture rule.
    Unrecognized,
}

/// One simulated video frame from the debug window: the pose held on the
/// keyboard (if any) and the pointer position standing in for the palm.
#[derive(Clone, Copy, Debug)]
pub enum SimInput {
    Tick { pose: Option<SimPose>, at: Point2 },
}

/// Landmark source driven by [`SimInput`] ticks from the visualizer window.
///
/// Each tick becomes one full synthetic 21-landmark frame, so the whole
/// extract → classify → debounce path runs exactly as it would on detector
/// output — holding a key for six ticks is what confirms a gesture.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<LandmarkFrame>) {
        for SimInput::Tick { pose, at } in self.rx {
            let hands = match pose {
                Some(pose) => synthesize(pose, at),
                None => Vec::new(),
            };
            if tx.send(LandmarkFrame { hands }).is_err() {
                return;
            }
        }
    }
}

/// Build the landmark set for a simulated pose around the pointer position.
///
/// Pinch poses are forced onto their side of the mirrored midline so the
/// classifier reads the intended hand regardless of where the pointer sits.
fn synthesize(pose: SimPose, at: Point2) -> Vec<HandObservation> {
    let left_side = Point2::new(at.x.max(0.65), at.y);
    let right_side = Point2::new(at.x.min(0.35), at.y);
    match pose {
        SimPose::Open => vec![poses::open_hand(at)],
        SimPose::Fist => vec![poses::closed_fist(at)],
        SimPose::PinchLeft => vec![poses::pinch(left_side)],
        SimPose::PinchRight => vec![poses::pinch(right_side)],
        SimPose::BothPinch => vec![poses::pinch(right_side), poses::pinch(left_side)],
        SimPose::ThumbsUp => vec![poses::thumbs_up(at)],
        SimPose::ThumbsDown => vec![poses::thumbs_down(at)],
        SimPose::Victory => vec![poses::victory(at)],
        SimPose::Unrecognized => vec![poses::unrecognized(at)],
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_flow::{classify, GestureLabel};
    use hand_track::HandFeatures;

    fn label_for(pose: SimPose) -> Option<GestureLabel> {
        let hands = synthesize(pose, Point2::new(0.5, 0.5));
        let feats: Vec<HandFeatures> = hands.iter().map(HandFeatures::extract).collect();
        classify(&feats)
    }

    #[test]
    fn every_sim_pose_classifies_as_intended() {
        assert_eq!(label_for(SimPose::Open), Some(GestureLabel::OpenHand));
        assert_eq!(label_for(SimPose::Fist), Some(GestureLabel::ClosedFist));
        assert_eq!(label_for(SimPose::PinchLeft), Some(GestureLabel::PinchLeft));
        assert_eq!(label_for(SimPose::PinchRight), Some(GestureLabel::PinchRight));
        assert_eq!(label_for(SimPose::BothPinch), Some(GestureLabel::PinchLeft));
        assert_eq!(label_for(SimPose::ThumbsUp), Some(GestureLabel::ThumbsUp));
        assert_eq!(label_for(SimPose::ThumbsDown), Some(GestureLabel::ThumbsDown));
        assert_eq!(label_for(SimPose::Victory), Some(GestureLabel::Victory));
        assert_eq!(label_for(SimPose::Unrecognized), None);
    }

    #[test]
    fn sim_source_forwards_one_frame_per_tick() {
        let (in_tx, in_rx) = mpsc::channel();
        let frames = spawn_landmark_source(SimLandmarkSource { rx: in_rx });

        let at = Point2::new(0.5, 0.5);
        in_tx.send(SimInput::Tick { pose: Some(SimPose::Open), at }).unwrap();
        in_tx.send(SimInput::Tick { pose: None, at }).unwrap();
        drop(in_tx);

        let first = frames.recv().expect("first frame");
        assert_eq!(first.hands.len(), 1);
        let second = frames.recv().expect("second frame");
        assert!(second.hands.is_empty());
        // Input channel closed: the source thread shuts down.
        assert!(frames.recv().is_err());
    }

    #[test]
    fn both_pinch_puts_one_hand_on_each_side() {
        let hands = synthesize(SimPose::BothPinch, Point2::new(0.5, 0.5));
        assert_eq!(hands.len(), 2);
        let xs: Vec<f32> = hands
            .iter()
            .map(|h| HandFeatures::extract(h).palm_center.x)
            .collect();
        assert!(xs[0] < 0.5 && xs[1] > 0.5);
    }
}
