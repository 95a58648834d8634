//! # grove_control
//!
//! Host application for the gesture-controlled particle-tree scene. The
//! gesture core lives in the sibling crates (`hand_track` extracts per-hand
//! geometry, `gesture_flow` classifies/debounces/dispatches); this crate
//! supplies everything around it: the landmark-frame source seam, the
//! consuming scene state, and a software debug view.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture (hold ~6 frames) | Action |
//! |---|---|
//! | Open hand | Tree disperses |
//! | Closed fist | Tree assembles |
//! | Pinch (user's right hand) | Next photo |
//! | Pinch (user's left hand) | Previous photo |
//! | Thumbs-up, held | Camera dollies in |
//! | Thumbs-down, held | Camera dollies out |
//! | Victory | Toggle snow |
//!
//! ## Simulation keyboard shortcuts
//!
//! The detector is an external capability; this crate ships a keyboard
//! simulator that synthesizes real 21-landmark frames, so holding a key
//! exercises the same debounce path a webcam feed would.
//!
//! | Key (hold) | Pose |
//! |---|---|
//! | `O` | Open hand |
//! | `F` | Closed fist |
//! | `N` / `P` | Pinch right / left |
//! | `B` | Both hands pinch |
//! | `U` / `J` | Thumbs up / down |
//! | `V` | Victory |
//! | `X` | Unrecognized hand |
//!
//! Pointer fallback (always available, sole control when tracking is
//! unavailable): `Space` toggle mode, `←`/`→` photos, `T` snow, `W`/`S`
//! dolly, `Q` quit.

pub mod app;
pub mod source;
pub mod visualizer;
