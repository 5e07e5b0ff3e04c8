//! # cloud_layout
//!
//! Procedural point layouts for the two states of the particle tree:
//!
//! * **Dispersed** — points scattered through a spherical shell
//!   ([`dispersed_shell`]).
//! * **Formed** — points wound around a cone along a few spiral arms,
//!   either filling the volume ([`formed_volume`]) or hugging the surface
//!   ([`formed_surface`]).
//!
//! The [`ring`] module adds the smaller fixed layouts the scene needs around
//! the tree (gallery ring, photo spiral, gift ring, floor scatter, star
//! outline).
//!
//! Every generator returns a [`PositionSet`] of exactly `count` points.
//! Sampling is random; pass a seeded RNG when repeatable output matters.
//!
//! ## Quick start
//!
//! ```rust
//! use cloud_layout::{dispersed_shell, formed_volume, Cone, Shell};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let chaos  = dispersed_shell(&mut rng, 500, Shell::new(15.0, 20.0)).unwrap();
//! let formed = formed_volume(&mut rng, 500, Cone::new(5.0, 12.0)).unwrap();
//! assert_eq!(chaos.len(), formed.len());
//! ```

use std::f32::consts::TAU;
use std::ops::Index;

use glam::Vec3;
use rand::Rng;
use thiserror::Error;

pub mod ring;

// ════════════════════════════════════════════════════════════════════════════
// LayoutError
// ════════════════════════════════════════════════════════════════════════════

/// Rejected layout parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("element count must be greater than zero")]
    EmptyCount,

    #[error("invalid shell radii: min {min}, max {max}")]
    InvalidRadii { min: f32, max: f32 },

    #[error("invalid cone: base radius {base_radius}, height {height}")]
    InvalidCone { base_radius: f32, height: f32 },

    #[error("invalid spiral parameters: {0}")]
    InvalidSpiral(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

// ════════════════════════════════════════════════════════════════════════════
// PositionSet
// ════════════════════════════════════════════════════════════════════════════

/// An ordered, immutable sequence of 3-D points.
///
/// Index `i` names one logical element; a dispersed set and a formed set built
/// for the same group line up index for index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionSet {
    points: Vec<Vec3>,
}

impl PositionSet {
    pub fn from_points(points: Vec<Vec3>) -> Self {
        PositionSet { points }
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn as_slice(&self) -> &[Vec3] { &self.points }
    pub fn get(&self, i: usize) -> Option<Vec3> { self.points.get(i).copied() }
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> { self.points.iter() }

    /// True when every coordinate of every point is finite.
    pub fn all_finite(&self) -> bool {
        self.points.iter().all(|p| p.is_finite())
    }

    /// Smallest and largest distance from the origin, or `None` when empty.
    pub fn radius_range(&self) -> Option<(f32, f32)> {
        let mut it = self.points.iter().map(|p| p.length());
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), r| (lo.min(r), hi.max(r))))
    }

    /// Axis-aligned bounding box `(min, max)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))))
    }
}

impl Index<usize> for PositionSet {
    type Output = Vec3;
    fn index(&self, i: usize) -> &Vec3 { &self.points[i] }
}

impl FromIterator<Vec3> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        PositionSet { points: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a PositionSet {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;
    fn into_iter(self) -> Self::IntoIter { self.points.iter() }
}

// ════════════════════════════════════════════════════════════════════════════
// Shape parameters
// ════════════════════════════════════════════════════════════════════════════

/// Spherical shell between two radii, centred on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shell {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Shell {
    pub fn new(min_radius: f32, max_radius: f32) -> Self {
        Shell { min_radius, max_radius }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius >= 0.0
            && self.min_radius <= self.max_radius;
        if ok {
            Ok(())
        } else {
            Err(LayoutError::InvalidRadii { min: self.min_radius, max: self.max_radius })
        }
    }
}

/// Upright cone centred vertically on the origin: base at `-height/2`,
/// apex at `+height/2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cone {
    pub base_radius: f32,
    pub height: f32,
}

impl Cone {
    pub fn new(base_radius: f32, height: f32) -> Self {
        Cone { base_radius, height }
    }

    pub fn validate(&self) -> Result<()> {
        let ok = self.base_radius.is_finite()
            && self.height.is_finite()
            && self.base_radius > 0.0
            && self.height > 0.0;
        if ok {
            Ok(())
        } else {
            Err(LayoutError::InvalidCone { base_radius: self.base_radius, height: self.height })
        }
    }

    /// Radius of the cone at height `h` measured from the base (0..height).
    /// Linear taper; zero at the apex.
    pub fn taper_radius(&self, h: f32) -> f32 {
        (1.0 - h / self.height) * self.base_radius
    }

    /// Convert a centred world `y` back to height above the base.
    pub fn height_above_base(&self, y: f32) -> f32 {
        y + self.height / 2.0
    }

    /// Taper radius at a centred world `y`.
    pub fn radius_at_y(&self, y: f32) -> f32 {
        self.taper_radius(self.height_above_base(y))
    }

    /// World `y` of the apex.
    pub fn apex_y(&self) -> f32 { self.height / 2.0 }
}

/// How points are wound around a [`Cone`].
///
/// * `height_exponent` — height fraction is `u^exponent`; values above 1
///   push mass toward the base.
/// * `height_cap` — upper bound on the height fraction (keeps the apex free).
/// * `rotations` — full turns each arm makes from base to apex.
/// * `arms` — number of evenly offset spiral arms.
/// * `angle_jitter` — total width (radians) of the uniform angular jitter.
/// * `radial_band` — radius sampled as `taper × [lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpiralParams {
    pub arms:            u32,
    pub rotations:       f32,
    pub angle_jitter:    f32,
    pub radial_band:     (f32, f32),
    pub height_exponent: f32,
    pub height_cap:      f32,
}

impl SpiralParams {
    /// Dense filler: two arms, eight turns, wide jitter, radius 0.3..1.0.
    pub fn volume() -> Self {
        SpiralParams {
            arms:            2,
            rotations:       8.0,
            angle_jitter:    1.5,
            radial_band:     (0.3, 1.0),
            height_exponent: 1.2,
            height_cap:      1.0,
        }
    }

    /// Discrete ornaments: three arms, five turns, radius 0.9..1.1 of the
    /// taper, height capped at 85% to leave room for the crown.
    pub fn surface() -> Self {
        SpiralParams {
            arms:            3,
            rotations:       5.0,
            angle_jitter:    1.0,
            radial_band:     (0.9, 1.1),
            height_exponent: 1.2,
            height_cap:      0.85,
        }
    }

    pub fn with_height_cap(mut self, cap: f32) -> Self {
        self.height_cap = cap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.arms == 0 {
            return Err(LayoutError::InvalidSpiral("at least one arm is required".into()));
        }
        let (lo, hi) = self.radial_band;
        if !(lo >= 0.0 && lo <= hi && hi.is_finite()) {
            return Err(LayoutError::InvalidSpiral(format!("radial band {}..{}", lo, hi)));
        }
        if !(self.height_cap > 0.0 && self.height_cap <= 1.0) {
            return Err(LayoutError::InvalidSpiral(format!("height cap {}", self.height_cap)));
        }
        if !(self.height_exponent > 0.0 && self.height_exponent.is_finite()) {
            return Err(LayoutError::InvalidSpiral(format!("height exponent {}", self.height_exponent)));
        }
        if !self.rotations.is_finite() || !self.angle_jitter.is_finite() {
            return Err(LayoutError::InvalidSpiral("non-finite rotation or jitter".into()));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Generators
// ════════════════════════════════════════════════════════════════════════════

/// Scatter `count` points through a spherical shell.
///
/// Radius is uniform in `[min_radius, max_radius]`; direction is uniform over
/// the sphere (polar angle via `acos(2u − 1)` so the poles are not
/// over-sampled).
pub fn dispersed_shell<R: Rng + ?Sized>(rng: &mut R, count: usize, shell: Shell) -> Result<PositionSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }
    shell.validate()?;

    let span = shell.max_radius - shell.min_radius;
    let points = (0..count)
        .map(|_| {
            let r     = (shell.min_radius + rng.gen::<f32>() * span).min(shell.max_radius);
            let theta = rng.gen::<f32>() * TAU;
            let phi   = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            )
        })
        .collect();
    Ok(PositionSet::from_points(points))
}

/// Wind `count` points around `cone` following `params`.
pub fn spiral_cone<R: Rng + ?Sized>(
    rng:    &mut R,
    count:  usize,
    cone:   Cone,
    params: &SpiralParams,
) -> Result<PositionSet> {
    if count == 0 { return Err(LayoutError::EmptyCount); }
    cone.validate()?;
    params.validate()?;

    let (band_lo, band_hi) = params.radial_band;
    let points = (0..count)
        .map(|_| {
            let h_norm = rng.gen::<f32>().powf(params.height_exponent) * params.height_cap;
            let h      = h_norm * cone.height;
            let r_at_h = cone.taper_radius(h);

            let arm        = rng.gen_range(0..params.arms);
            let arm_offset = arm as f32 / params.arms as f32 * TAU;
            let jitter     = (rng.gen::<f32>() - 0.5) * params.angle_jitter;
            let angle      = h_norm * TAU * params.rotations + arm_offset + jitter;

            let r = r_at_h * (band_lo + rng.gen::<f32>() * (band_hi - band_lo));
            Vec3::new(r * angle.cos(), h - cone.height / 2.0, r * angle.sin())
        })
        .collect();
    Ok(PositionSet::from_points(points))
}

/// Spiral-flow volume for dense filler particles ([`SpiralParams::volume`]).
pub fn formed_volume<R: Rng + ?Sized>(rng: &mut R, count: usize, cone: Cone) -> Result<PositionSet> {
    spiral_cone(rng, count, cone, &SpiralParams::volume())
}

/// Surface band for discrete ornaments ([`SpiralParams::surface`]) with the
/// height capped at `top_fraction` of the cone.
pub fn formed_surface<R: Rng + ?Sized>(
    rng:          &mut R,
    count:        usize,
    cone:         Cone,
    top_fraction: f32,
) -> Result<PositionSet> {
    spiral_cone(rng, count, cone, &SpiralParams::surface().with_height_cap(top_fraction))
}

// ════════════════════════════════════════════════════════════════════════════
// Layout — a regenerable description of one position set
// ════════════════════════════════════════════════════════════════════════════

/// A layout description that can be re-run whenever the count or shape
/// changes.  Element groups keep one of these per state.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    /// [`dispersed_shell`].
    Shell(Shell),
    /// [`spiral_cone`].
    Spiral { cone: Cone, params: SpiralParams },
    /// [`ring::scatter_ring`].
    Scatter(ring::ScatterRing),
    /// [`ring::gift_ring`] positions.
    GiftRing(ring::GiftRing),
    /// The same point repeated for every element.
    Fixed(Vec3),
}

impl Layout {
    pub fn name(&self) -> &'static str {
        match self {
            Layout::Shell(_)     => "shell",
            Layout::Spiral { .. } => "spiral cone",
            Layout::Scatter(_)   => "scatter ring",
            Layout::GiftRing(_)  => "gift ring",
            Layout::Fixed(_)     => "fixed",
        }
    }

    /// Generate `count` points for this layout.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<PositionSet> {
        match self {
            Layout::Shell(shell)           => dispersed_shell(rng, count, *shell),
            Layout::Spiral { cone, params } => spiral_cone(rng, count, *cone, params),
            Layout::Scatter(spec)          => ring::scatter_ring(rng, count, spec),
            Layout::GiftRing(spec)         => ring::gift_ring(rng, count, spec).map(|o| o.positions),
            Layout::Fixed(p) => {
                if count == 0 { return Err(LayoutError::EmptyCount); }
                Ok(PositionSet::from_points(vec![*p; count]))
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
