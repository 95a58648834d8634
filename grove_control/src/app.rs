//! Top-level application state and the frame loop.
//!
//! `AppState` is the consuming side of the pipeline's [`FrameOutput`]: it
//! owns the photo carousel, the snow flag, the camera dolly, and the status
//! line, and it implements the pointer fallback used when gesture tracking
//! is unavailable.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use gesture_flow::{CameraCommand, FrameOutput, GesturePipeline, PhotoStep, SceneMode};
use hand_track::HandObservation;

use crate::source::{spawn_landmark_source, SimLandmarkSource};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    /// Number of photo panels in the carousel.
    pub photo_count: usize,
    pub snow_on_start: bool,
    /// Run without gesture tracking (pointer control only). Also the mode
    /// entered automatically when source initialization fails.
    pub pointer_only: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            photo_count: 12,
            snow_on_start: false,
            pointer_only: false,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tracking status
// ════════════════════════════════════════════════════════════════════════════

/// Whether gesture input is available this session.
///
/// Initialization failure of the detector or camera is non-fatal: the app
/// degrades to pointer control and reports the reason once (no retry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingStatus {
    Active,
    Unavailable(String),
}

// ════════════════════════════════════════════════════════════════════════════
// Pointer fallback actions
// ════════════════════════════════════════════════════════════════════════════

/// Direct scene commands from mouse/keyboard, bypassing the gesture path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    ToggleMode,
    PhotoNext,
    PhotoPrev,
    ToggleSnow,
    DollyForward,
    DollyBackward,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

/// Camera dolly step applied per held frame, and its travel limits.
const DOLLY_STEP: f32 = 0.015;
const DOLLY_MIN: f32 = 0.5;
const DOLLY_MAX: f32 = 2.0;

/// Per-frame approach rate of the assemble/disperse morph animation.
const MORPH_RATE: f32 = 0.05;

pub struct AppState {
    // ── gesture pipeline ─────────────────────────────────────────────────
    pipeline: GesturePipeline,
    tracking: TrackingStatus,

    // ── scene state (the external consumer of FrameOutput) ───────────────
    photo_count: usize,
    photo_index: usize,
    snow_enabled: bool,
    dolly: f32,
    rotate_target: (f32, f32),
    hand_detected: bool,
    two_hands: bool,

    // ── view animation ───────────────────────────────────────────────────
    /// 0.0 = fully assembled, 1.0 = fully dispersed.
    morph: f32,

    // ── status message ───────────────────────────────────────────────────
    pub status: String,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        AppState {
            pipeline: GesturePipeline::new(),
            tracking: TrackingStatus::Active,
            photo_count: cfg.photo_count.max(1),
            photo_index: 0,
            snow_enabled: cfg.snow_on_start,
            dolly: 1.0,
            rotate_target: (0.5, 0.5),
            hand_detected: false,
            two_hands: false,
            morph: 0.0,
            status: "Ready — show an open hand to disperse the tree".to_string(),
        }
    }

    // ── degraded mode ─────────────────────────────────────────────────────

    /// Record that gesture input is unavailable. Reported once; pointer
    /// control remains the sole fallback.
    pub fn set_tracking_unavailable(&mut self, reason: &str) {
        eprintln!("[tracking] {} — pointer control only", reason);
        self.status = format!("No gesture input ({}) — pointer control only", reason);
        self.tracking = TrackingStatus::Unavailable(reason.to_string());
    }

    pub fn tracking_active(&self) -> bool {
        self.tracking == TrackingStatus::Active
    }

    // ── gesture path ──────────────────────────────────────────────────────

    /// Run one landmark frame through the pipeline and fold the output into
    /// the scene. `now` is the frame's wall-clock sample.
    pub fn process_hands(&mut self, hands: &[HandObservation], now: Instant) {
        let out = self.pipeline.process(hands, now);
        self.apply(out);
    }

    fn apply(&mut self, out: FrameOutput) {
        self.hand_detected = out.hand.detected;
        self.two_hands = out.two_hands;
        self.rotate_target = (out.hand.x, out.hand.y);

        if out.mode_changed {
            self.status = match out.mode {
                SceneMode::Dispersed => "OPEN HAND — tree disperses".to_string(),
                SceneMode::Assembled => "FIST — tree assembles".to_string(),
            };
        }

        match out.camera {
            CameraCommand::Forward => self.dolly_by(-DOLLY_STEP),
            CameraCommand::Backward => self.dolly_by(DOLLY_STEP),
            CameraCommand::Idle => {}
        }

        if let Some(step) = out.photo_step {
            self.step_photo(step);
            self.status = format!(
                "PINCH — photo {}/{}",
                self.photo_index + 1,
                self.photo_count
            );
        }

        if out.snow_toggled {
            self.snow_enabled = !self.snow_enabled;
            self.status = if self.snow_enabled {
                "VICTORY — snow on".to_string()
            } else {
                "VICTORY — snow off".to_string()
            };
        }
    }

    // ── pointer fallback path ─────────────────────────────────────────────

    pub fn apply_pointer(&mut self, action: PointerAction) {
        match action {
            PointerAction::ToggleMode => {
                // Pointer control writes the mode through the pipeline so
                // the gesture edge-trigger baseline stays in sync.
                let target = match self.pipeline.mode() {
                    SceneMode::Assembled => SceneMode::Dispersed,
                    SceneMode::Dispersed => SceneMode::Assembled,
                };
                self.pipeline.set_mode(target);
                self.status = match target {
                    SceneMode::Dispersed => "pointer — tree disperses".to_string(),
                    SceneMode::Assembled => "pointer — tree assembles".to_string(),
                };
            }
            PointerAction::PhotoNext => {
                self.step_photo(PhotoStep::Next);
                self.status = format!("photo {}/{}", self.photo_index + 1, self.photo_count);
            }
            PointerAction::PhotoPrev => {
                self.step_photo(PhotoStep::Prev);
                self.status = format!("photo {}/{}", self.photo_index + 1, self.photo_count);
            }
            PointerAction::ToggleSnow => {
                self.snow_enabled = !self.snow_enabled;
                self.status = format!("snow {}", if self.snow_enabled { "on" } else { "off" });
            }
            PointerAction::DollyForward => self.dolly_by(-DOLLY_STEP * 4.0),
            PointerAction::DollyBackward => self.dolly_by(DOLLY_STEP * 4.0),
        }
    }

    // ── per-frame tick ────────────────────────────────────────────────────

    /// Advance the view animation toward the current mode.
    pub fn tick(&mut self) {
        let target = match self.mode() {
            SceneMode::Assembled => 0.0,
            SceneMode::Dispersed => 1.0,
        };
        if (self.morph - target).abs() <= MORPH_RATE {
            self.morph = target;
        } else if self.morph < target {
            self.morph += MORPH_RATE;
        } else {
            self.morph -= MORPH_RATE;
        }
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn step_photo(&mut self, step: PhotoStep) {
        self.photo_index = match step {
            PhotoStep::Next => (self.photo_index + 1) % self.photo_count,
            PhotoStep::Prev => (self.photo_index + self.photo_count - 1) % self.photo_count,
        };
    }

    fn dolly_by(&mut self, delta: f32) {
        self.dolly = (self.dolly + delta).clamp(DOLLY_MIN, DOLLY_MAX);
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn mode(&self) -> SceneMode {
        self.pipeline.mode()
    }
    pub fn morph(&self) -> f32 {
        self.morph
    }
    pub fn photo_index(&self) -> usize {
        self.photo_index
    }
    pub fn photo_count(&self) -> usize {
        self.photo_count
    }
    pub fn snow_enabled(&self) -> bool {
        self.snow_enabled
    }
    pub fn dolly(&self) -> f32 {
        self.dolly
    }
    pub fn rotate_target(&self) -> (f32, f32) {
        self.rotate_target
    }
    pub fn hand_detected(&self) -> bool {
        self.hand_detected
    }
    pub fn two_hands(&self) -> bool {
        self.two_hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the visualizer window, spawns the simulated landmark source, and
/// drives the poll → drain → tick → render loop at ~60 fps. Dropping the
/// frame receiver on exit shuts the source thread down; there is no other
/// resource to release.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Sim landmark channel ──────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel();

    // Source acquisition can fail (camera permission, missing model); the
    // sim never does, but the degraded path is exercised via --pointer.
    let frame_rx = if cfg.pointer_only {
        Err("tracking disabled by --pointer".to_string())
    } else {
        Ok(spawn_landmark_source(SimLandmarkSource { rx: sim_rx }))
    };

    // ── Visualizer (owns the window and the sim input sender) ─────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(&cfg);
    let frame_rx = match frame_rx {
        Ok(rx) => Some(rx),
        Err(reason) => {
            app.set_tracking_unavailable(&reason);
            None
        }
    };

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input: emits one SimInput tick and collects any
        //    pointer-fallback actions.
        let poll = vis.poll_input();
        if poll.quit {
            break;
        }

        // 2. Drain landmark frames through the pipeline. The sim produces
        //    one frame per tick, so this usually runs exactly once.
        if let Some(rx) = &frame_rx {
            loop {
                match rx.try_recv() {
                    Ok(frame) => app.process_hands(&frame.hands, Instant::now()),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return Ok(()),
                }
            }
        }

        // 3. Pointer fallback actions apply directly.
        for action in poll.pointer {
            app.apply_pointer(action);
        }

        // 4. Per-frame animation.
        app.tick();

        // 5. Render.
        vis.render(&app);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
