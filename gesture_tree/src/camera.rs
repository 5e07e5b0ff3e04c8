//! Camera controller: orbits or follows the hand's reference point and
//! always looks at the origin.
//!
//! Per-frame gains are expressed at a 60 fps reference and rescaled by the
//! real frame delta, so `gain = 0.05` moves 5% of the remaining distance per
//! 1/60 s regardless of the actual frame rate.

use glam::{Mat4, Vec2, Vec3};
use serde::Deserialize;

/// Frame rate the per-frame gains are quoted at.
pub const REFERENCE_FPS: f32 = 60.0;

/// Starting camera position.
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, 4.0, 20.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Horizontal hand motion spins the camera around the tree.
    #[default]
    Orbit,
    /// Hand position maps directly to a camera offset.
    Absolute,
    /// Orbit for azimuth, hand height for camera height.
    Combined,
}

impl CameraMode {
    pub fn name(self) -> &'static str {
        match self {
            CameraMode::Orbit    => "orbit",
            CameraMode::Absolute => "absolute",
            CameraMode::Combined => "combined",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    pub mode:        CameraMode,
    /// Radians of orbit per unit of normalised horizontal hand travel.
    pub sensitivity: f32,
    pub distance:    f32,
    /// Rest height in orbit mode.
    pub height:      f32,
    /// Per-frame gain toward the orbit height.
    pub height_gain: f32,
    /// Per-frame gain toward the absolute-mode target.
    pub follow_gain: f32,
    /// Offset range mapped from the `[0, 1]²` hand position.
    pub span:        Vec2,
    /// Camera z in absolute mode.
    pub depth:       f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            mode:        CameraMode::Orbit,
            sensitivity: 5.0,
            distance:    20.0,
            height:      0.0,
            height_gain: 0.1,
            follow_gain: 0.05,
            span:        Vec2::new(30.0, 20.0),
            depth:       25.0,
        }
    }
}

/// Where the camera is this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position:    Vec3,
    pub orbit_angle: f32,
}

impl CameraPose {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }
}

/// Fraction of the remaining distance covered in `dt` seconds for a gain
/// quoted per reference frame.
pub fn frame_gain(gain: f32, dt: f32) -> f32 {
    if !(dt.is_finite() && dt > 0.0) {
        return 0.0;
    }
    let g = gain.clamp(0.0, 1.0);
    1.0 - (1.0 - g).powf(dt * REFERENCE_FPS)
}

#[derive(Clone, Debug)]
pub struct CameraController {
    settings:   CameraSettings,
    pose:       CameraPose,
    /// Last tracked reference point; cleared whenever tracking drops.
    last_point: Option<Vec2>,
    /// Combined mode: height target from the last tracked frame.
    held_height: Option<f32>,
}

impl CameraController {
    pub fn new(settings: CameraSettings) -> Self {
        CameraController {
            settings,
            pose: CameraPose { position: INITIAL_POSITION, orbit_angle: 0.0 },
            last_point: None,
            held_height: None,
        }
    }

    pub fn pose(&self) -> CameraPose { self.pose }
    pub fn settings(&self) -> &CameraSettings { &self.settings }

    /// Absolute-mode target for a hand at `p`.
    pub fn absolute_target(&self, p: Vec2) -> Vec3 {
        let s = &self.settings;
        Vec3::new((0.5 - p.x) * s.span.x, (0.5 - p.y) * s.span.y, s.depth)
    }

    /// Advance one render frame.  `pointer` is the reference point while a
    /// hand is tracked, `None` otherwise.
    pub fn update(&mut self, pointer: Option<Vec2>, dt: f32) -> CameraPose {
        match self.settings.mode {
            CameraMode::Orbit    => self.orbit(pointer, dt, None),
            CameraMode::Absolute => self.follow(pointer, dt),
            CameraMode::Combined => {
                if let Some(p) = pointer {
                    self.held_height = Some(self.absolute_target(p).y);
                }
                self.orbit(pointer, dt, self.held_height)
            }
        }
        self.last_point = pointer;
        self.pose
    }

    fn orbit(&mut self, pointer: Option<Vec2>, dt: f32, height: Option<f32>) {
        let s = self.settings;
        // Only a delta between two consecutive tracked frames counts.
        if let (Some(prev), Some(p)) = (self.last_point, pointer) {
            self.pose.orbit_angle -= (p.x - prev.x) * s.sensitivity;
        }
        let a = self.pose.orbit_angle;
        let target_y = height.unwrap_or(s.height);
        let y = self.pose.position.y;
        self.pose.position = Vec3::new(
            a.sin() * s.distance,
            y + (target_y - y) * frame_gain(s.height_gain, dt),
            a.cos() * s.distance,
        );
    }

    fn follow(&mut self, pointer: Option<Vec2>, dt: f32) {
        let Some(p) = pointer else { return };
        let target = self.absolute_target(p);
        let k = frame_gain(self.settings.follow_gain, dt);
        self.pose.position = self.pose.position.lerp(target, k);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn orbit() -> CameraController { CameraController::new(CameraSettings::default()) }

    #[test]
    fn gain_matches_reference_frame() {
        assert!((frame_gain(0.05, DT) - 0.05).abs() < 1e-5);
        assert_eq!(frame_gain(0.05, 0.0), 0.0);
        // Two half-frames cover the same ground as one full frame.
        let half = frame_gain(0.05, DT / 2.0);
        assert!((1.0 - (1.0 - half) * (1.0 - half) - 0.05).abs() < 1e-5);
    }

    #[test]
    fn orbit_accumulates_delta() {
        let mut c = orbit();
        c.update(Some(Vec2::new(0.5, 0.5)), DT);
        assert_eq!(c.pose().orbit_angle, 0.0);
        c.update(Some(Vec2::new(0.6, 0.5)), DT);
        assert!((c.pose().orbit_angle + 0.5).abs() < 1e-5);
        let p = c.pose().position;
        assert!((Vec2::new(p.x, p.z).length() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn resumed_tracking_ignores_stale_delta() {
        let mut c = orbit();
        c.update(Some(Vec2::new(0.2, 0.5)), DT);
        c.update(None, DT);
        // Hand reappears far away: no jump.
        c.update(Some(Vec2::new(0.9, 0.5)), DT);
        assert_eq!(c.pose().orbit_angle, 0.0);
        c.update(Some(Vec2::new(0.8, 0.5)), DT);
        assert!((c.pose().orbit_angle - 0.5).abs() < 1e-5);
    }

    #[test]
    fn orbit_height_eases_to_rest() {
        let mut c = orbit();
        c.update(None, DT);
        assert!((c.pose().position.y - 3.6).abs() < 1e-4);
        for _ in 0..300 { c.update(None, DT); }
        assert!(c.pose().position.y.abs() < 1e-3);
    }

    #[test]
    fn absolute_follows_and_holds() {
        let mut c = CameraController::new(CameraSettings { mode: CameraMode::Absolute, ..Default::default() });
        let target = c.absolute_target(Vec2::new(0.0, 1.0));
        assert_eq!(target, Vec3::new(15.0, -10.0, 25.0));
        for _ in 0..600 { c.update(Some(Vec2::new(0.0, 1.0)), DT); }
        assert!((c.pose().position - target).length() < 1e-3);

        let held = c.pose();
        for _ in 0..60 { c.update(None, DT); }
        assert_eq!(c.pose(), held);
    }

    #[test]
    fn combined_uses_hand_height() {
        let mut c = CameraController::new(CameraSettings { mode: CameraMode::Combined, ..Default::default() });
        for _ in 0..600 { c.update(Some(Vec2::new(0.5, 0.0)), DT); }
        assert!((c.pose().position.y - 10.0).abs() < 1e-2);
    }

    #[test]
    fn combined_holds_height_without_hand() {
        let mut c = CameraController::new(CameraSettings { mode: CameraMode::Combined, ..Default::default() });
        for _ in 0..600 { c.update(Some(Vec2::new(0.5, 0.0)), DT); }
        let held = c.pose();
        for _ in 0..300 { c.update(None, DT); }
        assert!((c.pose().position.y - 10.0).abs() < 1e-2);
        assert_eq!(c.pose().orbit_angle, held.orbit_angle);
    }

    #[test]
    fn view_looks_at_origin() {
        let pose = CameraPose { position: Vec3::new(0.0, 0.0, 20.0), orbit_angle: 0.0 };
        let v = pose.view().transform_point3(Vec3::ZERO);
        assert!((v - Vec3::new(0.0, 0.0, -20.0)).length() < 1e-4);
    }
}
