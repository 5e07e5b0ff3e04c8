//! Element groups: an aligned pair, per-element attributes, a blend profile
//! and the transform buffer the renderer reads.

use glam::Vec3;
use rand::Rng;

use cloud_layout::{Cone, Layout};

use crate::easing::{lerp, Easing};
use crate::{DualSet, GroupError, Transform};

// ════════════════════════════════════════════════════════════════════════════
// MaterialClass
// ════════════════════════════════════════════════════════════════════════════

/// Which look an element is drawn with.  The renderer picks colours from
/// this; the blend never reads it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    Foliage,
    GiftBox,
    OrbGloss,
    OrbMatte,
    Light,
    Dust,
    Star,
    PresentVelvet,
    PresentSatin,
    PresentMetal,
    FloorDust,
    PhotoFrame,
}

impl MaterialClass {
    pub fn name(self) -> &'static str {
        match self {
            MaterialClass::Foliage       => "foliage",
            MaterialClass::GiftBox       => "gift box",
            MaterialClass::OrbGloss      => "gloss orb",
            MaterialClass::OrbMatte      => "matte orb",
            MaterialClass::Light         => "light",
            MaterialClass::Dust          => "dust",
            MaterialClass::Star          => "star",
            MaterialClass::PresentVelvet => "velvet present",
            MaterialClass::PresentSatin  => "satin present",
            MaterialClass::PresentMetal  => "metal present",
            MaterialClass::FloorDust     => "floor dust",
            MaterialClass::PhotoFrame    => "photo frame",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Attribute specs
// ════════════════════════════════════════════════════════════════════════════

/// How each element's size is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSpec {
    Constant(f32),
    /// Uniform in `[min, max)`.
    Uniform { min: f32, max: f32 },
    /// Linear from `bottom` at the cone base to `top` at the apex, judged by
    /// the element's formed height, plus uniform noise in `[0, noise)`.
    HeightGraded { cone: Cone, bottom: f32, top: f32, noise: f32 },
}

/// How each element's material class is assigned.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialSpec {
    Uniform(MaterialClass),
    /// Element `i` gets `classes[i % classes.len()]`.
    Cycle(Vec<MaterialClass>),
}

impl MaterialSpec {
    fn class_for(&self, i: usize) -> MaterialClass {
        match self {
            MaterialSpec::Uniform(c) => *c,
            MaterialSpec::Cycle(cs) if !cs.is_empty() => cs[i % cs.len()],
            MaterialSpec::Cycle(_) => MaterialClass::Dust,
        }
    }
}

/// Per-element auxiliary attributes, stored column-wise.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementAttributes {
    pub size:     Vec<f32>,
    /// Random phase in `[0, 1)`; offsets idle motion between elements.
    pub phase:    Vec<f32>,
    pub material: Vec<MaterialClass>,
}

impl ElementAttributes {
    /// Size 1, phase 0, foliage material for `n` elements.
    pub fn uniform(n: usize) -> Self {
        ElementAttributes {
            size:     vec![1.0; n],
            phase:    vec![0.0; n],
            material: vec![MaterialClass::Foliage; n],
        }
    }

    /// Draw attributes for every element of `pair`.
    pub fn sample<R: Rng + ?Sized>(
        rng:       &mut R,
        pair:      &DualSet,
        size:      &SizeSpec,
        materials: &MaterialSpec,
    ) -> Self {
        let n = pair.len();
        let mut attrs = ElementAttributes {
            size:     Vec::with_capacity(n),
            phase:    Vec::with_capacity(n),
            material: Vec::with_capacity(n),
        };
        for (i, formed) in pair.formed().iter().enumerate() {
            let s = match *size {
                SizeSpec::Constant(s) => s,
                SizeSpec::Uniform { min, max } => min + rng.gen::<f32>() * (max - min),
                SizeSpec::HeightGraded { cone, bottom, top, noise } => {
                    let h_norm = (cone.height_above_base(formed.y) / cone.height).clamp(0.0, 1.0);
                    lerp(bottom, top, h_norm) + rng.gen::<f32>() * noise
                }
            };
            attrs.size.push(s);
            attrs.phase.push(rng.gen::<f32>());
            attrs.material.push(materials.class_for(i));
        }
        attrs
    }

    pub fn len(&self) -> usize { self.size.len() }
    pub fn is_empty(&self) -> bool { self.size.is_empty() }

    fn check(&self, group: &str, n: usize) -> Result<(), GroupError> {
        for (what, got) in [
            ("size", self.size.len()),
            ("phase", self.phase.len()),
            ("material", self.material.len()),
        ] {
            if got != n {
                return Err(GroupError::AttributeMismatch {
                    group: group.to_string(), what, expected: n, got,
                });
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// BlendProfile — how progress becomes transforms
// ════════════════════════════════════════════════════════════════════════════

/// Small oscillation added on top of the blended position.
///
/// Offset is `amplitude × (sin(t·rx + φ), cos(t·ry + φ), sin(t·rz + φ))`
/// with `φ = phase × phase_scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jitter {
    pub amplitude:   f32,
    pub rates:       Vec3,
    pub phase_scale: f32,
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter { amplitude: 0.1, rates: Vec3::new(0.5, 0.3, 0.7), phase_scale: 10.0 }
    }
}

impl Jitter {
    #[inline]
    pub fn offset(&self, time: f32, phase: f32) -> Vec3 {
        let p = phase * self.phase_scale;
        Vec3::new(
            (time * self.rates.x + p).sin(),
            (time * self.rates.y + p).cos(),
            (time * self.rates.z + p).sin(),
        ) * self.amplitude
    }
}

/// Vertical float of the whole group: `amplitude × sin(rate·t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bob {
    pub amplitude: f32,
    pub rate:      f32,
}

impl Bob {
    pub fn offset(&self, time: f32) -> f32 {
        (time * self.rate).sin() * self.amplitude
    }
}

/// Element scale before group growth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleRule {
    /// `base × size`.
    Fixed(f32),
    /// `lerp(dispersed, formed, t) × size`, using the position blend factor.
    Between { dispersed: f32, formed: f32 },
}

/// Everything a group needs to turn `(progress, time)` into transforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendProfile {
    /// Curve applied to progress for the position/rotation blend.
    pub easing: Easing,
    pub jitter: Option<Jitter>,
    /// Per-axis spin rate; a non-zero axis rotates as `rate·t + index`.
    pub spin:   Vec3,
    pub scale:  ScaleRule,
    /// Raise each element by `lift × element scale` (boxes resting on a floor).
    pub lift:   f32,
    /// Group translation.
    pub origin: Vec3,
    /// Whole-group scale about `origin` driven by progress.
    pub growth: Option<Easing>,
    pub bob:    Option<Bob>,
}

impl Default for BlendProfile {
    fn default() -> Self {
        BlendProfile {
            easing: Easing::QuartInOut,
            jitter: None,
            spin:   Vec3::ZERO,
            scale:  ScaleRule::Fixed(1.0),
            lift:   0.0,
            origin: Vec3::ZERO,
            growth: None,
            bob:    None,
        }
    }
}

impl BlendProfile {
    /// Dense particles: eased blend plus idle jitter; scale is the size.
    pub fn particle() -> Self {
        BlendProfile { jitter: Some(Jitter::default()), ..Default::default() }
    }

    /// Discrete ornaments: eased blend, tumbling spin, `base × variance`.
    pub fn ornament(base_scale: f32) -> Self {
        BlendProfile {
            spin:  Vec3::new(0.5, 0.3, 0.0),
            scale: ScaleRule::Fixed(base_scale),
            ..Default::default()
        }
    }

    /// A single crowning element that grows in with smoothstep, turns slowly
    /// and floats a little.
    pub fn crown(origin: Vec3) -> Self {
        BlendProfile {
            spin:   Vec3::new(0.0, 0.2, 0.0),
            origin,
            growth: Some(Easing::Smoothstep),
            bob:    Some(Bob { amplitude: 0.1, rate: 1.5 }),
            ..Default::default()
        }
    }

    /// Things standing under the tree; the whole group grows with `progress²`.
    pub fn grounded(origin: Vec3, lift: f32) -> Self {
        BlendProfile {
            lift,
            origin,
            growth: Some(Easing::Quadratic),
            ..Default::default()
        }
    }

    /// Hanging frames: linear blend of position, rotation and scale.
    pub fn gallery(dispersed_scale: f32, formed_scale: f32) -> Self {
        BlendProfile {
            easing: Easing::Linear,
            scale:  ScaleRule::Between { dispersed: dispersed_scale, formed: formed_scale },
            bob:    Some(Bob { amplitude: 0.1, rate: 0.5 }),
            ..Default::default()
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ElementGroup
// ════════════════════════════════════════════════════════════════════════════

/// A named collection of elements blended together.
///
/// The transform buffer is allocated once; [`ElementGroup::update`] rewrites
/// it in place.
#[derive(Clone, Debug)]
pub struct ElementGroup {
    name:         String,
    layouts:      Option<(Layout, Layout)>,
    pair:         DualSet,
    orientations: Option<(Vec<Vec3>, Vec<Vec3>)>,
    attrs:        ElementAttributes,
    profile:      BlendProfile,
    size_spec:    Option<(SizeSpec, MaterialSpec)>,
    transforms:   Vec<Transform>,
}

impl ElementGroup {
    /// Generate both layouts and the attributes for `count` elements.
    #[allow(clippy::too_many_arguments)]
    pub fn generate<R: Rng + ?Sized>(
        rng:       &mut R,
        name:      &str,
        count:     usize,
        dispersed: Layout,
        formed:    Layout,
        size:      SizeSpec,
        materials: MaterialSpec,
        profile:   BlendProfile,
    ) -> Result<Self, GroupError> {
        let pair  = DualSet::generate(rng, count, &dispersed, &formed)?;
        let attrs = ElementAttributes::sample(rng, &pair, &size, &materials);
        let mut group = ElementGroup::from_pair(name, pair, attrs, profile)?;
        group.layouts   = Some((dispersed, formed));
        group.size_spec = Some((size, materials));
        Ok(group)
    }

    /// Wrap an existing pair.  Attribute columns must match its length.
    pub fn from_pair(
        name:    &str,
        pair:    DualSet,
        attrs:   ElementAttributes,
        profile: BlendProfile,
    ) -> Result<Self, GroupError> {
        attrs.check(name, pair.len())?;
        let n = pair.len();
        Ok(ElementGroup {
            name:         name.to_string(),
            layouts:      None,
            pair,
            orientations: None,
            attrs,
            profile,
            size_spec:    None,
            transforms:   vec![Transform::default(); n],
        })
    }

    /// Attach per-element base rotations for each state.
    pub fn with_orientations(mut self, dispersed: Vec<Vec3>, formed: Vec<Vec3>) -> Result<Self, GroupError> {
        let n = self.len();
        for (what, got) in [("dispersed rotations", dispersed.len()), ("formed rotations", formed.len())] {
            if got != n {
                return Err(GroupError::AttributeMismatch {
                    group: self.name.clone(), what, expected: n, got,
                });
            }
        }
        self.orientations = Some((dispersed, formed));
        Ok(self)
    }

    /// Rebuild the pair when the count or either layout differs from the
    /// current one.  Returns `Ok(false)` when nothing changed.
    ///
    /// Base rotations belong to the old elements and are dropped on rebuild;
    /// attach new ones with [`with_orientations`](Self::with_orientations).
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        rng:       &mut R,
        count:     usize,
        dispersed: Layout,
        formed:    Layout,
    ) -> Result<bool, GroupError> {
        let (size, materials) = match (&self.layouts, &self.size_spec) {
            (Some(_), Some(spec)) => spec.clone(),
            _ => return Err(GroupError::FixedLayout(self.name.clone())),
        };
        if let Some((d, f)) = &self.layouts {
            if count == self.len() && *d == dispersed && *f == formed {
                return Ok(false);
            }
        }
        let pair  = DualSet::generate(rng, count, &dispersed, &formed)?;
        let attrs = ElementAttributes::sample(rng, &pair, &size, &materials);
        self.transforms.resize(pair.len(), Transform::default());
        self.pair         = pair;
        self.attrs        = attrs;
        self.orientations = None;
        self.layouts      = Some((dispersed, formed));
        Ok(true)
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn len(&self) -> usize { self.pair.len() }
    pub fn is_empty(&self) -> bool { self.pair.is_empty() }
    pub fn pair(&self) -> &DualSet { &self.pair }
    pub fn attributes(&self) -> &ElementAttributes { &self.attrs }
    pub fn profile(&self) -> &BlendProfile { &self.profile }
    pub fn transforms(&self) -> &[Transform] { &self.transforms }

    /// Recompute every transform for this frame.
    ///
    /// `progress` is the raw (un-eased) choreography progress, `time` the
    /// elapsed seconds used by idle motion.
    pub fn update(&mut self, progress: f32, time: f32) -> &[Transform] {
        let p       = &self.profile;
        let t_blend = p.easing.apply(progress);
        let growth  = p.growth.map_or(1.0, |e| e.apply(progress));
        let origin  = p.origin + Vec3::Y * p.bob.map_or(0.0, |b| b.offset(time));

        let dispersed = self.pair.dispersed().as_slice();
        let formed    = self.pair.formed().as_slice();

        for (i, slot) in self.transforms.iter_mut().enumerate() {
            let mut pos = dispersed[i].lerp(formed[i], t_blend);
            if let Some(j) = &p.jitter {
                pos += j.offset(time, self.attrs.phase[i]);
            }

            let scale = match p.scale {
                ScaleRule::Fixed(base) => base * self.attrs.size[i],
                ScaleRule::Between { dispersed, formed } => {
                    lerp(dispersed, formed, t_blend) * self.attrs.size[i]
                }
            };
            pos.y += p.lift * scale;

            let mut rot = match &self.orientations {
                Some((rd, rf)) => rd[i].lerp(rf[i], t_blend),
                None           => Vec3::ZERO,
            };
            if p.spin != Vec3::ZERO {
                let idx = i as f32;
                let spin = |rate: f32| if rate != 0.0 { rate * time + idx } else { 0.0 };
                rot += Vec3::new(spin(p.spin.x), spin(p.spin.y), spin(p.spin.z));
            }

            *slot = Transform {
                position: origin + pos * growth,
                rotation: rot,
                scale:    scale * growth,
            };
        }
        &self.transforms
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_layout::{PositionSet, Shell, SpiralParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn three() -> DualSet {
        DualSet::new(
            PositionSet::from_points(vec![Vec3::ZERO, Vec3::ONE, Vec3::splat(2.0)]),
            PositionSet::from_points(vec![
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 1.0, 1.0),
                Vec3::new(10.0, 2.0, 2.0),
            ]),
        ).unwrap()
    }

    fn plain(pair: DualSet, profile: BlendProfile) -> ElementGroup {
        let n = pair.len();
        ElementGroup::from_pair("t", pair, ElementAttributes::uniform(n), profile).unwrap()
    }

    #[test]
    fn midpoint_blend() {
        let mut g = plain(three(), BlendProfile::default());
        let t = g.update(0.5, 0.0);
        assert_eq!(t[0].position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(t[1].position, Vec3::new(5.5, 1.0, 1.0));
        assert_eq!(t[2].position, Vec3::new(6.0, 2.0, 2.0));
    }

    #[test]
    fn endpoints_match_sets() {
        let mut g = plain(three(), BlendProfile::default());
        assert_eq!(g.update(0.0, 0.0)[2].position, Vec3::splat(2.0));
        assert_eq!(g.update(1.0, 0.0)[2].position, Vec3::new(10.0, 2.0, 2.0));
    }

    #[test]
    fn eased_not_linear_off_midpoint() {
        let mut g = plain(three(), BlendProfile::default());
        // ease(0.25) = 8 × 0.25⁴ = 0.03125
        let x = g.update(0.25, 0.0)[0].position.x;
        assert!((x - 0.3125).abs() < 1e-5, "x = {}", x);
    }

    #[test]
    fn jitter_bounded() {
        let mut g = plain(three(), BlendProfile::particle());
        for k in 0..50 {
            let time = k as f32 * 0.37;
            let t = g.update(1.0, time);
            let d = t[1].position - Vec3::new(10.0, 1.0, 1.0);
            assert!(d.abs().max_element() <= 0.1 + 1e-5);
        }
    }

    #[test]
    fn ornament_spin_offsets_by_index() {
        let mut g = plain(three(), BlendProfile::ornament(0.45));
        let t = g.update(1.0, 2.0);
        assert!((t[0].rotation.x - 1.0).abs() < 1e-6);
        assert!((t[2].rotation.x - 3.0).abs() < 1e-6);
        assert!((t[2].rotation.y - 2.6).abs() < 1e-6);
        assert_eq!(t[2].rotation.z, 0.0);
        assert!((t[0].scale - 0.45).abs() < 1e-6);
    }

    #[test]
    fn grounded_shrinks_into_origin() {
        let origin = Vec3::new(0.0, -6.0, 0.0);
        let mut g = plain(three(), BlendProfile::grounded(origin, 0.4));
        let t = g.update(0.0, 0.0);
        for tr in t {
            assert_eq!(tr.position, origin);
            assert_eq!(tr.scale, 0.0);
        }
        let t = g.update(1.0, 0.0);
        // formed[1] = (10,1,1), lifted by 0.4 × scale 1
        assert!((t[1].position - Vec3::new(10.0, -4.6, 1.0)).length() < 1e-5);
        assert_eq!(t[1].scale, 1.0);
    }

    #[test]
    fn crown_grows_with_smoothstep() {
        let pair = DualSet::new(
            PositionSet::from_points(vec![Vec3::ZERO]),
            PositionSet::from_points(vec![Vec3::ZERO]),
        ).unwrap();
        let mut g = plain(pair, BlendProfile::crown(Vec3::new(0.0, 6.0, 0.0)));
        assert_eq!(g.update(0.0, 0.0)[0].scale, 0.0);
        assert!((g.update(0.5, 0.0)[0].scale - 0.5).abs() < 1e-6);
        let t = g.update(1.0, 1.0)[0];
        assert!((t.rotation.y - 0.2).abs() < 1e-6);
        assert!((t.position.y - (6.0 + 1.5f32.sin() * 0.1)).abs() < 1e-5);
    }

    #[test]
    fn gallery_blends_rotation_and_scale_linearly() {
        let pair = DualSet::new(
            PositionSet::from_points(vec![Vec3::ZERO]),
            PositionSet::from_points(vec![Vec3::new(4.0, 0.0, 0.0)]),
        ).unwrap();
        let mut g = plain(pair, BlendProfile::gallery(2.5, 0.8))
            .with_orientations(vec![Vec3::ZERO], vec![Vec3::new(0.0, 1.0, 0.0)])
            .unwrap();
        let t = g.update(0.25, 0.0)[0];
        assert!((t.position.x - 1.0).abs() < 1e-6);
        assert!((t.rotation.y - 0.25).abs() < 1e-6);
        assert!((t.scale - (2.5 + (0.8 - 2.5) * 0.25)).abs() < 1e-6);
    }

    #[test]
    fn orientation_length_checked() {
        let err = plain(three(), BlendProfile::default())
            .with_orientations(vec![Vec3::ZERO], vec![Vec3::ZERO; 3])
            .unwrap_err();
        assert!(matches!(err, GroupError::AttributeMismatch { expected: 3, got: 1, .. }));
    }

    #[test]
    fn attribute_length_checked() {
        let err = ElementGroup::from_pair("x", three(), ElementAttributes::uniform(2), BlendProfile::default())
            .unwrap_err();
        assert!(matches!(err, GroupError::AttributeMismatch { what: "size", .. }));
    }

    #[test]
    fn generated_group_regenerates_only_on_change() {
        let mut rng = StdRng::seed_from_u64(5);
        let shell  = Layout::Shell(Shell::new(15.0, 20.0));
        let spiral = Layout::Spiral { cone: Cone::new(5.0, 12.0), params: SpiralParams::volume() };
        let mut g = ElementGroup::generate(
            &mut rng, "foliage", 100, shell.clone(), spiral.clone(),
            SizeSpec::HeightGraded { cone: Cone::new(5.0, 12.0), bottom: 0.2, top: 0.1, noise: 0.05 },
            MaterialSpec::Uniform(MaterialClass::Foliage),
            BlendProfile::particle(),
        ).unwrap();
        let before = g.pair().clone();
        assert!(!g.regenerate(&mut rng, 100, shell.clone(), spiral.clone()).unwrap());
        assert_eq!(g.pair(), &before);

        assert!(g.regenerate(&mut rng, 40, shell, spiral).unwrap());
        assert_eq!(g.len(), 40);
        assert_eq!(g.transforms().len(), 40);
        assert_eq!(g.attributes().len(), 40);
    }

    #[test]
    fn regenerate_drops_stale_orientations() {
        let mut rng = StdRng::seed_from_u64(6);
        let shell  = Layout::Shell(Shell::new(15.0, 20.0));
        let spiral = Layout::Spiral { cone: Cone::new(5.0, 12.0), params: SpiralParams::surface() };
        let mut g = ElementGroup::generate(
            &mut rng, "orbs", 4, shell.clone(), spiral.clone(),
            SizeSpec::Constant(1.0),
            MaterialSpec::Uniform(MaterialClass::OrbGloss),
            BlendProfile::default(),
        ).unwrap()
        .with_orientations(vec![Vec3::ZERO; 4], vec![Vec3::ONE; 4]).unwrap();

        assert!(g.regenerate(&mut rng, 8, shell.clone(), spiral).unwrap());
        let t = g.update(0.5, 0.0);
        assert_eq!(t.len(), 8);
        assert!(t.iter().all(|t| t.rotation == Vec3::ZERO));

        // Same count, new layout: old rotations must not carry over either.
        let mut g = g.with_orientations(vec![Vec3::ONE; 8], vec![Vec3::ONE; 8]).unwrap();
        let volume = Layout::Spiral { cone: Cone::new(5.0, 12.0), params: SpiralParams::volume() };
        assert!(g.regenerate(&mut rng, 8, shell, volume).unwrap());
        assert!(g.update(1.0, 0.0).iter().all(|t| t.rotation == Vec3::ZERO));
    }

    #[test]
    fn fixed_group_cannot_regenerate() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = plain(three(), BlendProfile::default());
        let err = g.regenerate(&mut rng, 3, Layout::Fixed(Vec3::ZERO), Layout::Fixed(Vec3::ZERO)).unwrap_err();
        assert_eq!(err, GroupError::FixedLayout("t".into()));
    }

    #[test]
    fn height_graded_sizes() {
        let mut rng = StdRng::seed_from_u64(8);
        let cone = Cone::new(5.0, 12.0);
        let pair = DualSet::new(
            PositionSet::from_points(vec![Vec3::ZERO, Vec3::ZERO]),
            PositionSet::from_points(vec![Vec3::new(0.0, -6.0, 0.0), Vec3::new(0.0, 6.0, 0.0)]),
        ).unwrap();
        let a = ElementAttributes::sample(
            &mut rng, &pair,
            &SizeSpec::HeightGraded { cone, bottom: 0.2, top: 0.1, noise: 0.05 },
            &MaterialSpec::Cycle(vec![MaterialClass::PresentVelvet, MaterialClass::PresentSatin]),
        );
        assert!(a.size[0] >= 0.2 && a.size[0] < 0.25);
        assert!(a.size[1] >= 0.1 && a.size[1] < 0.15);
        assert_eq!(a.material, vec![MaterialClass::PresentVelvet, MaterialClass::PresentSatin]);
        assert!(a.phase.iter().all(|p| (0.0..1.0).contains(p)));
    }
}
