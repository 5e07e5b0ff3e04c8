//! # dual_cloud
//!
//! Index-aligned pairs of point sets — one **dispersed**, one **formed** —
//! and the per-frame blend that turns a progress scalar into transforms.
//!
//! * [`DualSet`] — the aligned pair; element `i` of one side is element `i`
//!   of the other, for the lifetime of the pair.
//! * [`ElementGroup`] — a named pair plus per-element attributes (size,
//!   phase, material class), a [`BlendProfile`] and a reusable transform
//!   buffer rewritten in place every frame.
//! * [`easing`] — curves that reshape progress before blending.
//! * [`curve`] — string/attachment helpers for hanging frames.
//!
//! ## Quick start
//!
//! ```rust
//! use dual_cloud::{BlendProfile, DualSet, ElementGroup, ElementAttributes};
//! use cloud_layout::PositionSet;
//! use glam::Vec3;
//!
//! let pair = DualSet::new(
//!     PositionSet::from_points(vec![Vec3::ZERO, Vec3::ONE]),
//!     PositionSet::from_points(vec![Vec3::new(10.0, 0.0, 0.0), Vec3::new(10.0, 1.0, 1.0)]),
//! ).unwrap();
//! let attrs = ElementAttributes::uniform(2);
//! let mut group = ElementGroup::from_pair("demo", pair, attrs, BlendProfile::default()).unwrap();
//!
//! let t = group.update(0.5, 0.0);
//! assert_eq!(t[0].position, Vec3::new(5.0, 0.0, 0.0));
//! ```

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;
use thiserror::Error;

use cloud_layout::{Layout, LayoutError, PositionSet};

pub mod curve;
pub mod easing;
mod group;

pub use easing::{ease_in_out_quart, Easing};
pub use group::{
    BlendProfile, Bob, ElementAttributes, ElementGroup, Jitter, MaterialClass, MaterialSpec,
    ScaleRule, SizeSpec,
};

// ════════════════════════════════════════════════════════════════════════════
// GroupError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroupError {
    #[error("dispersed set has {dispersed} points but formed set has {formed}")]
    LengthMismatch { dispersed: usize, formed: usize },

    #[error("group \"{group}\": {what} has {got} entries, expected {expected}")]
    AttributeMismatch { group: String, what: &'static str, expected: usize, got: usize },

    #[error("group \"{0}\" was built from fixed positions and cannot be regenerated")]
    FixedLayout(String),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

// ════════════════════════════════════════════════════════════════════════════
// DualSet
// ════════════════════════════════════════════════════════════════════════════

/// Two position sets of equal length whose indices name the same elements.
#[derive(Clone, Debug, PartialEq)]
pub struct DualSet {
    dispersed: PositionSet,
    formed:    PositionSet,
}

impl DualSet {
    /// Pair two sets; fails unless they are the same length.
    pub fn new(dispersed: PositionSet, formed: PositionSet) -> Result<Self, GroupError> {
        if dispersed.len() != formed.len() {
            return Err(GroupError::LengthMismatch {
                dispersed: dispersed.len(),
                formed:    formed.len(),
            });
        }
        Ok(DualSet { dispersed, formed })
    }

    /// Generate both sides with the same count.
    pub fn generate<R: Rng + ?Sized>(
        rng:       &mut R,
        count:     usize,
        dispersed: &Layout,
        formed:    &Layout,
    ) -> Result<Self, GroupError> {
        let d = dispersed.generate(rng, count)?;
        let f = formed.generate(rng, count)?;
        DualSet::new(d, f)
    }

    pub fn len(&self) -> usize { self.dispersed.len() }
    pub fn is_empty(&self) -> bool { self.dispersed.is_empty() }
    pub fn dispersed(&self) -> &PositionSet { &self.dispersed }
    pub fn formed(&self) -> &PositionSet { &self.formed }

    /// Position of element `i` at blend factor `t` (already eased).
    pub fn position_at(&self, i: usize, t: f32) -> Option<Vec3> {
        Some(self.dispersed.get(i)?.lerp(self.formed.get(i)?, t))
    }

    /// Write every blended position into `out` (`out.len()` must equal
    /// `self.len()`; extra slots are left untouched).
    pub fn blend_into(&self, t: f32, out: &mut [Vec3]) {
        let pairs = self.dispersed.iter().zip(self.formed.iter());
        for (slot, (d, f)) in out.iter_mut().zip(pairs) {
            *slot = d.lerp(*f, t);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Transform
// ════════════════════════════════════════════════════════════════════════════

/// Per-element render transform: position, Euler rotation (XYZ, radians)
/// and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale:    f32,
}

impl Default for Transform {
    fn default() -> Self {
        Transform { position: Vec3::ZERO, rotation: Vec3::ZERO, scale: 1.0 }
    }
}

impl Transform {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }

    /// Map a point from element-local space into world space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.position + self.quat() * (local * self.scale)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
