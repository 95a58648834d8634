//! # gesture_flow
//!
//! Turns the noisy per-frame hand-landmark stream into debounced scene
//! commands. Three stages, run once per video frame:
//!
//! 1. **Classify** — the frame's hand features reduce to at most one
//!    [`GestureLabel`], chosen by fixed priority among mutually exclusive
//!    shapes (pinch beats everything, then thumbs, victory, open, fist).
//! 2. **Debounce** — a [`DebounceState`] of per-label consecutive-frame
//!    counters confirms a gesture only after it survives more than
//!    [`CONFIRM_FRAMES`] frames, with wall-clock cooldowns rate-limiting
//!    the one-shot actions.
//! 3. **Dispatch** — [`GesturePipeline::process`] folds confirmations into
//!    the externally visible [`FrameOutput`]: the persistent scene mode,
//!    the per-frame camera command, the palm-position passthrough, and
//!    one-shot photo/snow notifications.
//!
//! ## Gesture → action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Open hand (≥4 digits) | Scene disperses |
//! | Closed fist | Scene assembles |
//! | Pinch, user's right hand | Next photo (500 ms cooldown) |
//! | Pinch, user's left hand | Previous photo (500 ms cooldown) |
//! | Thumbs-up, held | Camera dollies forward |
//! | Thumbs-down, held | Camera dollies backward |
//! | Victory | Snow toggle (2000 ms cooldown) |
//!
//! All state lives in values the caller threads through each call — there
//! is no hidden global, so a frame loop, a test, or a replay harness can
//! each own an independent pipeline.

pub mod classify;
pub mod debounce;
pub mod pipeline;

pub use classify::{classify, GestureLabel, MIRROR_MIDLINE_X, PINCH_MAX_DISTANCE};
pub use debounce::{DebounceState, CONFIRM_FRAMES, PHOTO_COOLDOWN, SNOW_COOLDOWN};
pub use pipeline::{
    CameraCommand, FrameOutput, GesturePipeline, HandPosition, PhotoStep, SceneMode,
};
