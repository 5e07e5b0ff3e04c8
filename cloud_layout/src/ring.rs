//! Smaller fixed layouts arranged around the tree: the photo gallery ring and
//! photo spiral, the gift ring, floor scatter, and the crown's star outline.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::{Cone, LayoutError, PositionSet, Result};

/// Positions with a matching Euler rotation (radians, XYZ) per element.
#[derive(Clone, Debug, PartialEq)]
pub struct OrientedSet {
    pub positions: PositionSet,
    pub rotations: Vec<Vec3>,
}

impl OrientedSet {
    pub fn len(&self) -> usize { self.positions.len() }
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }
}

/// Yaw that turns an element's front face away from the vertical axis.
fn outward_yaw(x: f32, z: f32) -> f32 {
    x.atan2(z)
}

// ════════════════════════════════════════════════════════════════════════════
// Gallery ring — photo frames spread around the viewer when dispersed
// ════════════════════════════════════════════════════════════════════════════

/// Frames evenly spaced on a horizontal circle with a gentle vertical wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryRing {
    pub radius:         f32,
    /// Peak height of the `sin(2·angle)` wave.
    pub wave_amplitude: f32,
}

impl Default for GalleryRing {
    fn default() -> Self {
        GalleryRing { radius: 11.0, wave_amplitude: 1.5 }
    }
}

/// Deterministic; frames face outward.
pub fn gallery_ring(count: usize, spec: &GalleryRing) -> Result<OrientedSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }

    let mut points    = Vec::with_capacity(count);
    let mut rotations = Vec::with_capacity(count);
    for i in 0..count {
        let t     = if count > 1 { i as f32 / count as f32 } else { 0.0 };
        let angle = t * TAU;
        let x = spec.radius * angle.cos();
        let z = spec.radius * angle.sin();
        let y = (angle * 2.0).sin() * spec.wave_amplitude;
        points.push(Vec3::new(x, y, z));
        rotations.push(Vec3::new(0.0, outward_yaw(x, z), 0.0));
    }
    Ok(OrientedSet { positions: PositionSet::from_points(points), rotations })
}

// ════════════════════════════════════════════════════════════════════════════
// Photo spiral — frames hung around the formed tree
// ════════════════════════════════════════════════════════════════════════════

/// Frames climbing the tree on a spiral slightly outside its surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoSpiral {
    pub cone:         Cone,
    pub y_start:      f32,
    pub y_end:        f32,
    pub turns:        f32,
    /// Gap between the tree surface and the frame.
    pub standoff:     f32,
    /// Total width of the random pitch/roll tilt (radians).
    pub tilt_jitter:  f32,
}

impl Default for PhotoSpiral {
    fn default() -> Self {
        PhotoSpiral {
            cone:        Cone::new(5.0, 12.0),
            y_start:     -4.0,
            y_end:       4.0,
            turns:       3.0,
            standoff:    1.2,
            tilt_jitter: 0.2,
        }
    }
}

pub fn photo_spiral<R: Rng + ?Sized>(rng: &mut R, count: usize, spec: &PhotoSpiral) -> Result<OrientedSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }
    spec.cone.validate()?;

    let range = spec.y_end - spec.y_start;
    let mut points    = Vec::with_capacity(count);
    let mut rotations = Vec::with_capacity(count);
    for i in 0..count {
        let t = if count > 1 { i as f32 / (count - 1) as f32 } else { 0.5 };
        let y = spec.y_start + t * range;
        let r = spec.cone.radius_at_y(y).max(0.0) + spec.standoff;
        let angle = t * TAU * spec.turns;

        let x = r * angle.cos();
        let z = r * angle.sin();
        points.push(Vec3::new(x, y, z));

        let pitch = (rng.gen::<f32>() - 0.5) * spec.tilt_jitter;
        let roll  = (rng.gen::<f32>() - 0.5) * spec.tilt_jitter;
        rotations.push(Vec3::new(pitch, outward_yaw(x, z), roll));
    }
    Ok(OrientedSet { positions: PositionSet::from_points(points), rotations })
}

// ════════════════════════════════════════════════════════════════════════════
// Gift ring and floor scatter — grounded elements under the tree
// ════════════════════════════════════════════════════════════════════════════

/// Gifts spaced around the trunk with a little radial and angular noise.
/// Positions sit on the floor (`y = 0`); lift them by their own scale when
/// placing boxes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftRing {
    pub radius:        f32,
    pub radial_jitter: f32,
    pub angle_jitter:  f32,
}

impl Default for GiftRing {
    fn default() -> Self {
        GiftRing { radius: 5.0, radial_jitter: 1.0, angle_jitter: 0.2 }
    }
}

/// Each gift gets a random yaw.
pub fn gift_ring<R: Rng + ?Sized>(rng: &mut R, count: usize, spec: &GiftRing) -> Result<OrientedSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }

    let mut points    = Vec::with_capacity(count);
    let mut rotations = Vec::with_capacity(count);
    for i in 0..count {
        let base = i as f32 / count as f32 * TAU;
        let r = spec.radius + (rng.gen::<f32>() - 0.5) * spec.radial_jitter;
        let a = base + (rng.gen::<f32>() - 0.5) * spec.angle_jitter;
        points.push(Vec3::new(r * a.cos(), 0.0, r * a.sin()));
        rotations.push(Vec3::new(0.0, rng.gen::<f32>() * TAU, 0.0));
    }
    Ok(OrientedSet { positions: PositionSet::from_points(points), rotations })
}

/// Flat annulus of loose particles at a fixed height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterRing {
    pub min_radius: f32,
    pub max_radius: f32,
    pub y:          f32,
}

impl Default for ScatterRing {
    fn default() -> Self {
        ScatterRing { min_radius: 5.5, max_radius: 9.0, y: 0.05 }
    }
}

pub fn scatter_ring<R: Rng + ?Sized>(rng: &mut R, count: usize, spec: &ScatterRing) -> Result<PositionSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }
    if !(spec.min_radius >= 0.0 && spec.min_radius <= spec.max_radius) {
        return Err(LayoutError::InvalidRadii { min: spec.min_radius, max: spec.max_radius });
    }
    let span = spec.max_radius - spec.min_radius;
    Ok((0..count)
        .map(|_| {
            let r = spec.min_radius + rng.gen::<f32>() * span;
            let a = rng.gen::<f32>() * TAU;
            Vec3::new(r * a.cos(), spec.y, r * a.sin())
        })
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// Star outline
// ════════════════════════════════════════════════════════════════════════════

/// Closed outline of an `n`-pointed star in the XY plane, alternating outer
/// and inner vertices, starting on the +X axis.  Returns `2n` vertices.
pub fn star_outline(points: usize, inner_radius: f32, outer_radius: f32) -> Vec<Vec2> {
    (0..points * 2)
        .map(|i| {
            let angle  = i as f32 * PI / points as f32;
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            Vec2::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gallery_single_frame_at_angle_zero() {
        let ring = gallery_ring(1, &GalleryRing::default()).unwrap();
        assert_eq!(ring.positions[0], Vec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn gallery_frames_on_radius() {
        let ring = gallery_ring(8, &GalleryRing::default()).unwrap();
        for p in ring.positions.iter() {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 11.0).abs() < 1e-4);
            assert!(p.y.abs() <= 1.5 + 1e-5);
        }
    }

    #[test]
    fn gallery_faces_outward() {
        let ring = gallery_ring(4, &GalleryRing::default()).unwrap();
        for (p, rot) in ring.positions.iter().zip(&ring.rotations) {
            // Front (+Z rotated by yaw) points along the radial direction.
            let front = Vec3::new(rot.y.sin(), 0.0, rot.y.cos());
            let radial = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(front.dot(radial) > 0.999);
        }
    }

    #[test]
    fn photo_spiral_spans_heights() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = photo_spiral(&mut rng, 5, &PhotoSpiral::default()).unwrap();
        assert_eq!(s.positions[0].y, -4.0);
        assert_eq!(s.positions[4].y, 4.0);
        // Outside the tree surface
        let cone = Cone::new(5.0, 12.0);
        for p in s.positions.iter() {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r > cone.radius_at_y(p.y));
        }
    }

    #[test]
    fn photo_spiral_single_frame_midway() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = photo_spiral(&mut rng, 1, &PhotoSpiral::default()).unwrap();
        assert_eq!(s.positions[0].y, 0.0);
    }

    #[test]
    fn gift_ring_near_radius() {
        let mut rng = StdRng::seed_from_u64(9);
        let g = gift_ring(&mut rng, 12, &GiftRing::default()).unwrap();
        assert_eq!(g.len(), 12);
        for p in g.positions.iter() {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((4.5..=5.5).contains(&r));
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn scatter_ring_in_annulus() {
        let mut rng = StdRng::seed_from_u64(11);
        let set = scatter_ring(&mut rng, 200, &ScatterRing::default()).unwrap();
        for p in set.iter() {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!(r >= 5.5 - 1e-4 && r <= 9.0 + 1e-4);
        }
    }

    #[test]
    fn star_outline_alternates() {
        let v = star_outline(5, 0.4, 1.0);
        assert_eq!(v.len(), 10);
        assert!((v[0].length() - 1.0).abs() < 1e-6);
        assert!((v[1].length() - 0.4).abs() < 1e-6);
    }
}
