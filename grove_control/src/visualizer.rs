//! Software-rendered debug view using `minifb`.
//!
//! This window is the stand-in for the real rendering layer: it consumes
//! the same state the production scene would (mode/morph, photo index,
//! snow flag, dolly, hand position) and doubles as the input device for
//! the keyboard simulator and the pointer fallback.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ MODE: DISPERSED              ❄ snow          │
//! │                                              │
//! │            particle tree (morphing)          │
//! │                 ○ hand cursor                │
//! │                                              │
//! │  [photo strip ▪▪▪▫▪▪]                        │
//! │  status bar                                  │
//! │  key legend                                  │
//! └──────────────────────────────────────────────┘
//! ```

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use hand_track::Point2;

use crate::app::{AppState, PointerAction};
use crate::source::{SimInput, SimPose};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 540;

const STATUS_Y: usize = WIN_H - 40;
const PHOTO_STRIP_Y: usize = STATUS_Y - 26;
const PHOTO_BOX_W: usize = 16;
const PHOTO_BOX_H: usize = 12;

const BG_COLOR: u32 = 0xFF0B1026; // deep night blue
const STATUS_BG: u32 = 0xFF13224A;
const NEEDLE_COLOR: u32 = 0xFF2E8B57;
const ORNAMENT_COLOR: u32 = 0xFFE0453A;
const STAR_COLOR: u32 = 0xFFFFD700;
const SNOW_COLOR: u32 = 0xFFE8F0FF;
const CURSOR_COLOR: u32 = 0xFF9AE6FF;
const PHOTO_COLOR: u32 = 0xFF3A5BA0;
const PHOTO_ACTIVE: u32 = 0xFFFFD700;

const PARTICLE_COUNT: usize = 420;
const SNOWFLAKE_COUNT: usize = 90;

// ════════════════════════════════════════════════════════════════════════════
// Particle field
// ════════════════════════════════════════════════════════════════════════════

/// A foliage particle with a home on the tree cone and a scatter position;
/// the view lerps between the two by the app's morph factor.
struct Particle {
    assembled: (f32, f32),
    dispersed: (f32, f32),
    ornament: bool,
}

/// Deterministic particle field so the tree looks the same every run.
fn build_particles() -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|i| {
            let h1 = hash01(i as u32, 1);
            let h2 = hash01(i as u32, 2);
            let h3 = hash01(i as u32, 3);
            let h4 = hash01(i as u32, 4);

            // Cone: apex at y=0.18, base at y=0.82, width grows linearly.
            let y = 0.18 + 0.64 * h1;
            let half_w = 0.02 + 0.22 * (y - 0.18) / 0.64;
            let x = 0.5 + (h2 * 2.0 - 1.0) * half_w;

            Particle {
                assembled: (x, y),
                dispersed: (0.05 + 0.9 * h3, 0.05 + 0.9 * h4),
                ornament: i % 14 == 0,
            }
        })
        .collect()
}

/// Cheap integer hash → [0, 1).
fn hash01(i: u32, salt: u32) -> f32 {
    let mut x = i.wrapping_mul(0x9E37_79B9) ^ salt.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    (x & 0xFFFF) as f32 / 65536.0
}

// ════════════════════════════════════════════════════════════════════════════
// Input poll result
// ════════════════════════════════════════════════════════════════════════════

/// What one round of window polling produced.
pub struct InputPoll {
    pub quit: bool,
    /// Pointer-fallback actions (mouse/keys driving the scene directly).
    pub pointer: Vec<PointerAction>,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    sim_tx: Sender<SimInput>,
    particles: Vec<Particle>,
    /// Frame counter driving the snow fall.
    frame: u32,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Grove Control — Gesture Scene",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            particles: build_particles(),
            frame: 0,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll keyboard/mouse: emits exactly one simulated landmark tick and
    /// collects pointer-fallback actions.
    pub fn poll_input(&mut self) -> InputPoll {
        if !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return InputPoll { quit: true, pointer: Vec::new() };
        }

        // ── simulated hand: first held pose key wins ──────────────────────
        let held_pose = [
            (Key::O, SimPose::Open),
            (Key::F, SimPose::Fist),
            (Key::N, SimPose::PinchRight),
            (Key::P, SimPose::PinchLeft),
            (Key::B, SimPose::BothPinch),
            (Key::U, SimPose::ThumbsUp),
            (Key::J, SimPose::ThumbsDown),
            (Key::V, SimPose::Victory),
            (Key::X, SimPose::Unrecognized),
        ]
        .into_iter()
        .find(|(k, _)| self.window.is_key_down(*k))
        .map(|(_, p)| p);

        let at = self
            .window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(mx, my)| Point2::new(mx / WIN_W as f32, my / WIN_H as f32))
            .unwrap_or(Point2 { x: 0.5, y: 0.5 });

        // The receiver is gone in pointer-only mode; that's fine.
        let _ = self.sim_tx.send(SimInput::Tick { pose: held_pose, at });

        // ── pointer fallback ──────────────────────────────────────────────
        let mut pointer = Vec::new();
        let one_shot = |w: &Window, k: Key| w.is_key_pressed(k, KeyRepeat::No);

        if one_shot(&self.window, Key::Space) {
            pointer.push(PointerAction::ToggleMode);
        }
        if one_shot(&self.window, Key::Right) {
            pointer.push(PointerAction::PhotoNext);
        }
        if one_shot(&self.window, Key::Left) {
            pointer.push(PointerAction::PhotoPrev);
        }
        if one_shot(&self.window, Key::T) {
            pointer.push(PointerAction::ToggleSnow);
        }
        if self.window.is_key_down(Key::W) {
            pointer.push(PointerAction::DollyForward);
        }
        if self.window.is_key_down(Key::S) {
            pointer.push(PointerAction::DollyBackward);
        }

        InputPoll { quit: false, pointer }
    }

    // ── Render ────────────────────────────────────────────────────────────

    pub fn render(&mut self, app: &AppState) {
        self.frame = self.frame.wrapping_add(1);
        self.buf.fill(BG_COLOR);

        self.draw_tree(app);
        if app.snow_enabled() {
            self.draw_snow();
        }
        if app.hand_detected() {
            self.draw_hand_cursor(app);
        }
        self.draw_photo_strip(app);

        // ── Mode readout ──────────────────────────────────────────────────
        let mode_text = format!("MODE: {:?}", app.mode()).to_uppercase();
        self.draw_label(&mode_text, 10, 10, 0xFFAADDFF);
        if app.two_hands() {
            self.draw_label("TWO HANDS", 10, 22, 0xFFFFD700);
        }
        if !app.tracking_active() {
            self.draw_label("POINTER ONLY", WIN_W - 120, 10, ORNAMENT_COLOR);
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, STATUS_BG);
        self.draw_label(&app.status, 10, STATUS_Y + 8, 0xFFEEEEEE);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(
            "hold: O=open F=fist N/P=pinch B=both U/J=thumbs V=victory X=none  \
             pointer: Space Left/Right T=snow W/S=dolly  Q=quit",
            10,
            WIN_H - 14,
            0xFF7788AA,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    fn draw_tree(&mut self, app: &AppState) {
        let morph = app.morph();
        let scale = 1.0 / app.dolly();
        // Hand position nudges the whole tree sideways, a cheap stand-in
        // for the rotate target of the real camera.
        let sway = (app.rotate_target().0 - 0.5) * 0.08;

        // Collect positions first; the borrow on self.particles must end
        // before pixel writes start.
        let dots: Vec<(usize, usize, bool)> = self
            .particles
            .iter()
            .map(|p| {
                let x = lerp(p.assembled.0, p.dispersed.0, morph) + sway * (1.0 - morph);
                let y = lerp(p.assembled.1, p.dispersed.1, morph);
                // Dolly scales around the screen centre.
                let sx = 0.5 + (x - 0.5) * scale;
                let sy = 0.5 + (y - 0.5) * scale;
                (
                    (sx * WIN_W as f32) as usize,
                    (sy * WIN_H as f32) as usize,
                    p.ornament,
                )
            })
            .collect();

        for (x, y, ornament) in dots {
            let (color, r) = if ornament {
                (ORNAMENT_COLOR, 2)
            } else {
                (NEEDLE_COLOR, 1)
            };
            self.fill_rect(x.saturating_sub(r), y.saturating_sub(r), 2 * r + 1, 2 * r + 1, color);
        }

        // Star at the apex, fading out as the tree disperses.
        if morph < 0.5 {
            let sy = 0.5 + (0.15 - 0.5) * scale;
            let cy = (sy * WIN_H as f32) as usize;
            self.draw_diamond(WIN_W / 2, cy, 5, STAR_COLOR);
        }
    }

    fn draw_snow(&mut self) {
        for i in 0..SNOWFLAKE_COUNT {
            let speed = 0.002 + 0.003 * hash01(i as u32, 7);
            let x = hash01(i as u32, 8);
            let y = (hash01(i as u32, 9) + self.frame as f32 * speed).fract();
            let px = (x * WIN_W as f32) as usize;
            let py = (y * (STATUS_Y as f32 - 2.0)) as usize;
            self.set_pixel(px, py, SNOW_COLOR);
            self.set_pixel(px + 1, py, SNOW_COLOR);
        }
    }

    fn draw_hand_cursor(&mut self, app: &AppState) {
        let (hx, hy) = app.rotate_target();
        let cx = (hx * WIN_W as f32) as isize;
        let cy = (hy * WIN_H as f32) as isize;
        self.draw_ring(cx, cy, 12, CURSOR_COLOR);
        if app.two_hands() {
            self.draw_ring(cx, cy, 16, CURSOR_COLOR);
        }
    }

    fn draw_photo_strip(&mut self, app: &AppState) {
        let total = app.photo_count();
        let strip_w = total * (PHOTO_BOX_W + 4);
        let x0 = (WIN_W - strip_w.min(WIN_W)) / 2;
        for i in 0..total {
            let x = x0 + i * (PHOTO_BOX_W + 4);
            if x + PHOTO_BOX_W > WIN_W {
                break;
            }
            let color = if i == app.photo_index() { PHOTO_ACTIVE } else { PHOTO_COLOR };
            self.fill_rect(x, PHOTO_STRIP_Y, PHOTO_BOX_W, PHOTO_BOX_H, color);
            if i == app.photo_index() {
                self.draw_border(x, PHOTO_STRIP_Y, PHOTO_BOX_W, PHOTO_BOX_H, 0xFFFFFFFF);
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for col in x..(x + w).min(WIN_W) {
            if y < WIN_H {
                self.buf[y * WIN_W + col] = color;
            }
            if y + h - 1 < WIN_H {
                self.buf[(y + h - 1) * WIN_W + col] = color;
            }
        }
        for row in y..(y + h).min(WIN_H) {
            if x < WIN_W {
                self.buf[row * WIN_W + x] = color;
            }
            if x + w - 1 < WIN_W {
                self.buf[row * WIN_W + x + w - 1] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    fn draw_ring(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        // Midpoint-free ring: sample the bounding box, keep the annulus.
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 >= (r - 1) * (r - 1) && d2 <= r * r {
                    let x = cx + dx;
                    let y = cy + dy;
                    if x >= 0 && y >= 0 {
                        self.set_pixel(x as usize, y as usize, color);
                    }
                }
            }
        }
    }

    fn draw_diamond(&mut self, cx: usize, cy: usize, r: usize, color: u32) {
        for dy in 0..=r as isize {
            let dx = r as isize - dy;
            for &(sx, sy) in &[
                (cx as isize + dx, cy as isize + dy),
                (cx as isize - dx, cy as isize + dy),
                (cx as isize + dx, cy as isize - dy),
                (cx as isize - dx, cy as isize - dy),
            ] {
                if sx >= 0 && sy >= 0 {
                    self.set_pixel(sx as usize, sy as usize, color);
                }
            }
        }
    }

    /// Minimal 3×5 bitmap font for labels; unknown characters render as a
    /// centre dot.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.set_pixel(cx + col, y + row, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > WIN_W {
                break;
            }
        }
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
