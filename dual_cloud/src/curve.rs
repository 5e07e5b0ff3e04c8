//! Hanging-string geometry for photo frames.
//!
//! Each frame has an attachment point fixed in its local space; the string
//! is a uniform Catmull-Rom curve through those points in element order.
//! Both helpers write into caller-owned buffers so a frame loop can reuse
//! them.

use glam::Vec3;

use crate::Transform;

/// Local-space attachment: just above the frame centre along its up axis.
pub const ATTACHMENT_HEIGHT: f32 = 0.65;

/// Transform `local_offset` by every element transform, in order.
pub fn attachment_points(transforms: &[Transform], local_offset: Vec3, out: &mut Vec<Vec3>) {
    out.clear();
    out.extend(transforms.iter().map(|t| t.apply(local_offset)));
}

/// Sample a uniform Catmull-Rom spline through `points` into `out`.
///
/// `segments` is the total number of segments across the whole curve, so
/// `out` receives `segments + 1` samples; the first and last equal the first
/// and last control points.  End tangents come from duplicating the end
/// points.  With fewer than two points `out` is just a copy of `points`.
pub fn catmull_rom(points: &[Vec3], segments: usize, out: &mut Vec<Vec3>) {
    out.clear();
    if points.len() < 2 || segments == 0 {
        out.extend_from_slice(points);
        return;
    }

    let spans = (points.len() - 1) as f32;
    let last  = points.len() - 1;
    for s in 0..=segments {
        let u = s as f32 / segments as f32 * spans;
        let k = (u.floor() as usize).min(last - 1);
        let t = u - k as f32;

        let p0 = points[k.saturating_sub(1)];
        let p1 = points[k];
        let p2 = points[k + 1];
        let p3 = points[(k + 2).min(last)];
        out.push(segment_point(p0, p1, p2, p3, t));
    }
}

#[inline]
fn segment_point(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_passes_through_control_points() {
        let pts = vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 0.0), Vec3::new(3.0, 0.0, 1.0), Vec3::new(4.0, 4.0, 4.0)];
        let mut out = Vec::new();
        catmull_rom(&pts, 63, &mut out);
        assert_eq!(out.len(), 64);
        assert!((out[0] - pts[0]).length() < 1e-5);
        assert!((out[21] - pts[1]).length() < 1e-4);
        assert!((out[42] - pts[2]).length() < 1e-4);
        assert!((out[63] - pts[3]).length() < 1e-5);
    }

    #[test]
    fn straight_line_stays_straight() {
        let pts = vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)];
        let mut out = Vec::new();
        catmull_rom(&pts, 64, &mut out);
        assert!(out.iter().all(|p| p.y.abs() < 1e-6 && p.z.abs() < 1e-6));
        assert!(out.windows(2).all(|w| w[1].x >= w[0].x - 1e-6));
    }

    #[test]
    fn degenerate_inputs() {
        let mut out = vec![Vec3::ONE; 5];
        catmull_rom(&[], 64, &mut out);
        assert!(out.is_empty());
        catmull_rom(&[Vec3::Y], 64, &mut out);
        assert_eq!(out, vec![Vec3::Y]);
    }

    #[test]
    fn attachment_follows_transform() {
        let ts = [
            Transform { position: Vec3::new(1.0, 0.0, 0.0), rotation: Vec3::ZERO, scale: 2.0 },
            Transform::default(),
        ];
        let mut out = Vec::new();
        attachment_points(&ts, Vec3::new(0.0, ATTACHMENT_HEIGHT, 0.0), &mut out);
        assert_eq!(out.len(), 2);
        assert!((out[0] - Vec3::new(1.0, 1.3, 0.0)).length() < 1e-6);
        assert!((out[1] - Vec3::new(0.0, 0.65, 0.0)).length() < 1e-6);
    }
}
