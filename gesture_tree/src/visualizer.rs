//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                                                          │
//! │            every element group, depth-sorted splats      │
//! │            star outline, photo cards, hanging string     │
//! │                                                          │
//! │  status bar: state, progress, camera mode, hand          │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Drawing goes through [`Canvas`], which owns the colour and depth buffers
//! and does not need a window.

use std::sync::mpsc::Sender;
use std::time::Duration;

use glam::{Mat4, Vec2, Vec3};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use dual_cloud::{MaterialClass, Transform};

use crate::app::UiStatus;
use crate::camera::CameraPose;
use crate::error::AppError;
use crate::gesture::{SimHand, SimInput};
use crate::scene::{Scene, PHOTOS, STAR};

// ════════════════════════════════════════════════════════════════════════════
// Constants
// ════════════════════════════════════════════════════════════════════════════

/// Vertical field of view, degrees.
pub const FOV_DEGREES: f32 = 50.0;
const NEAR:            f32 = 0.1;
const FAR:             f32 = 200.0;
/// Largest splat radius in pixels.
const MAX_SPLAT:       f32 = 14.0;
const STATUS_H:        usize = 36;

const BG_COLOR:     u32 = 0xFF050A12;
const TEXT_BG:      u32 = 0xFF0F1E2E;
const STATUS_COLOR: u32 = 0xFFEEEEEE;
const LEGEND_COLOR: u32 = 0xFF888888;
const STRING_COLOR: u32 = 0xFFF5E6C8;
const STAR_COLOR:   u32 = 0xFFFFD700;
const CARD_COLOR:   u32 = 0xFFD4AF37;

/// Photo card half-extents in the frame's local space.
const CARD_HALF: Vec2 = Vec2::new(0.5, 0.6);

pub fn material_color(m: MaterialClass) -> u32 {
    match m {
        MaterialClass::Foliage       => 0xFF0A4D3C,
        MaterialClass::GiftBox       => 0xFFD4AF37,
        MaterialClass::OrbGloss      => 0xFF800020,
        MaterialClass::OrbMatte      => 0xFF720E1E,
        MaterialClass::Light         => 0xFFFFF8E7,
        MaterialClass::Dust          => 0xFFFFD700,
        MaterialClass::Star          => 0xFFFFD700,
        MaterialClass::PresentVelvet => 0xFF4A0404,
        MaterialClass::PresentSatin  => 0xFF800020,
        MaterialClass::PresentMetal  => 0xFFB8860B,
        MaterialClass::FloorDust     => 0xFFB8860B,
        MaterialClass::PhotoFrame    => 0xFFF5F5DC,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Canvas — colour + depth buffer and the drawing primitives
// ════════════════════════════════════════════════════════════════════════════

/// A point after projection: pixel coordinates plus view depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x:     f32,
    pub y:     f32,
    pub depth: f32,
}

pub struct Canvas {
    pub width:  usize,
    pub height: usize,
    pub buf:    Vec<u32>,
    depth:      Vec<f32>,
    view_proj:  Mat4,
    /// Pixels per world unit at depth 1.
    focal:      f32,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            buf:       vec![BG_COLOR; width * height],
            depth:     vec![f32::INFINITY; width * height],
            view_proj: Mat4::IDENTITY,
            focal:     1.0,
        }
    }

    /// Clear both buffers and set the camera for this frame.
    pub fn begin(&mut self, pose: CameraPose) {
        self.buf.fill(BG_COLOR);
        self.depth.fill(f32::INFINITY);
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let fov    = FOV_DEGREES.to_radians();
        self.view_proj = Mat4::perspective_rh(fov, aspect, NEAR, FAR) * pose.view();
        self.focal     = self.height as f32 / 2.0 / (fov / 2.0).tan();
    }

    /// Project a world point.  `None` behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let clip = self.view_proj * p.extend(1.0);
        if clip.w <= NEAR || !clip.is_finite() {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Projected {
            x:     (ndc.x * 0.5 + 0.5) * self.width as f32,
            y:     (0.5 - ndc.y * 0.5) * self.height as f32,
            depth: clip.w,
        })
    }

    /// Depth-tested disc for one element.
    pub fn splat(&mut self, t: &Transform, color: u32) {
        if t.scale <= 0.0 { return; }
        let Some(p) = self.project(t.position) else { return };
        let r = (t.scale * 0.5 * self.focal / p.depth).clamp(0.5, MAX_SPLAT);
        let shade = blend(color, BG_COLOR, (p.depth / 60.0).clamp(0.0, 0.6));

        let (x0, x1) = ((p.x - r).floor() as isize, (p.x + r).ceil() as isize);
        let (y0, y1) = ((p.y - r).floor() as isize, (p.y + r).ceil() as isize);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f32 + 0.5 - p.x, y as f32 + 0.5 - p.y);
                if dx * dx + dy * dy <= r * r {
                    self.plot_depth(x, y, p.depth, shade);
                }
            }
        }
    }

    /// Line between two world points, drawn over everything.
    pub fn line3(&mut self, a: Vec3, b: Vec3, color: u32) {
        if let (Some(pa), Some(pb)) = (self.project(a), self.project(b)) {
            self.line(pa.x as isize, pa.y as isize, pb.x as isize, pb.y as isize, color);
        }
    }

    /// Bresenham.
    pub fn line(&mut self, mut x0: isize, mut y0: isize, x1: isize, y1: isize, color: u32) {
        let limit = 4 * (self.width + self.height) as isize;
        if [x0, y0, x1, y1].iter().any(|v| v.abs() > limit) { return; }

        let dx  = (x1 - x0).abs();
        let dy  = -(y1 - y0).abs();
        let sx  = if x0 < x1 { 1 } else { -1 };
        let sy  = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.plot(x0, y0, color);
            if x0 == x1 && y0 == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x0 += sx; }
            if e2 <= dx { err += dx; y0 += sy; }
        }
    }

    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    fn plot(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn plot_depth(&mut self, x: isize, y: isize, depth: f32, color: u32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height { return; }
        let i = y as usize * self.width + x as usize;
        if depth < self.depth[i] {
            self.depth[i] = depth;
            self.buf[i]   = color;
        }
    }

    /// 3×5 bitmap text, one pixel per bit.
    pub fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.plot((cx + col) as isize, (y + row) as isize, color);
                    }
                }
            }
            cx += 4; // 3 wide + 1 gap
            if cx + 4 > self.width { break; }
        }
    }

    // ── scene ─────────────────────────────────────────────────────────────

    /// Everything in `scene` as seen from `pose`, plus the status bar.
    pub fn draw_frame(&mut self, scene: &Scene, pose: CameraPose, status: &UiStatus) {
        self.begin(pose);

        for group in scene.groups() {
            let materials = &group.attributes().material;
            for (t, m) in group.transforms().iter().zip(materials) {
                self.splat(t, material_color(*m));
            }
        }

        if let Some(star) = scene.group(STAR).and_then(|g| g.transforms().first().copied()) {
            self.draw_star(&star, scene.star_outline());
        }
        if let Some(photos) = scene.group(PHOTOS) {
            for t in photos.transforms() {
                self.draw_card(t);
            }
        }
        for w in scene.string().windows(2) {
            self.line3(w[0], w[1], STRING_COLOR);
        }

        self.draw_status(status);
    }

    fn draw_star(&mut self, t: &Transform, outline: &[Vec2]) {
        if t.scale <= 0.0 || outline.is_empty() { return; }
        let pts: Vec<Vec3> = outline.iter().map(|v| t.apply(v.extend(0.0))).collect();
        for i in 0..pts.len() {
            self.line3(pts[i], pts[(i + 1) % pts.len()], STAR_COLOR);
        }
    }

    fn draw_card(&mut self, t: &Transform) {
        let h = CARD_HALF;
        let corners = [
            Vec3::new(-h.x, -h.y, 0.0),
            Vec3::new( h.x, -h.y, 0.0),
            Vec3::new( h.x,  h.y, 0.0),
            Vec3::new(-h.x,  h.y, 0.0),
        ]
        .map(|c| t.apply(c));
        for i in 0..4 {
            self.line3(corners[i], corners[(i + 1) % 4], CARD_COLOR);
        }
    }

    fn draw_status(&mut self, status: &UiStatus) {
        let y = self.height.saturating_sub(STATUS_H);
        self.fill_rect(0, y, self.width, STATUS_H, TEXT_BG);
        self.draw_label(&status.line(), 10, y + 8, STATUS_COLOR);
        self.draw_label(
            "O=open  C=fist  R=relaxed  N=no hand  F=glitch  mouse=hand  Q=quit",
            10, y + 22, LEGEND_COLOR,
        );
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer — the window around a Canvas
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    canvas: Canvas,
    sim_tx: Sender<SimInput>,
    /// Last pose key pressed; held until another one.
    hand:   SimHand,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Sender<SimInput>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Gesture Tree",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            canvas: Canvas::new(width, height),
            sim_tx,
            hand: SimHand::Absent,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Read keys and mouse and forward them as one [`SimInput`].  Returns
    /// false when the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            return false;
        }
        for (key, hand) in [
            (Key::O, SimHand::Open),
            (Key::C, SimHand::Closed),
            (Key::R, SimHand::Relaxed),
            (Key::N, SimHand::Absent),
        ] {
            if one_shot(key) { self.hand = hand; }
        }
        let hand = if one_shot(Key::F) { SimHand::Glitch } else { self.hand };

        let pointer = self
            .window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Vec2::new(
                x / self.canvas.width as f32,
                y / self.canvas.height as f32,
            ))
            .unwrap_or(Vec2::splat(0.5));

        // A closed channel means the backend is gone; the window keeps running.
        let _ = self.sim_tx.send(SimInput { hand, pointer });
        true
    }

    pub fn render(&mut self, scene: &Scene, pose: CameraPose, status: &UiStatus) {
        self.canvas.draw_frame(scene, pose, status);
        let (w, h) = (self.canvas.width, self.canvas.height);
        self.window.update_with_buffer(&self.canvas.buf, w, h).ok();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '`' | '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
