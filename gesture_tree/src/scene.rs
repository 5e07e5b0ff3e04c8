//! Scene assembly: every element group of the tree, built from one
//! [`SceneSpec`], updated together from the shared progress.

use glam::{Vec2, Vec3};
use rand::Rng;

use cloud_layout::ring::{
    gallery_ring, gift_ring, photo_spiral, scatter_ring, star_outline, GalleryRing, GiftRing,
    PhotoSpiral, ScatterRing,
};
use cloud_layout::{Cone, Layout, Shell, SpiralParams};
use dual_cloud::curve::{attachment_points, catmull_rom, ATTACHMENT_HEIGHT};
use dual_cloud::{
    BlendProfile, DualSet, ElementAttributes, ElementGroup, GroupError, MaterialClass,
    MaterialSpec, SizeSpec,
};

/// Segments in the photo string curve.
pub const STRING_SEGMENTS: usize = 64;

/// Group names, as used by [`Scene::group`].
pub const FOLIAGE: &str = "foliage";
pub const STAR: &str = "star";
pub const GIFTS: &str = "gifts";
pub const FLOOR_DUST: &str = "floor dust";
pub const PHOTOS: &str = "photos";

/// One class of discrete ornament hung on the tree surface.
#[derive(Clone, Debug, PartialEq)]
pub struct OrnamentSpec {
    pub name:         &'static str,
    pub material:     MaterialClass,
    pub count:        usize,
    pub base_scale:   f32,
    /// Multiplier on the tree radius for this class's surface band.
    pub radius_scale: f32,
}

impl OrnamentSpec {
    /// Gift boxes, gloss orbs, matte orbs, lights, dust.
    pub fn defaults() -> Vec<OrnamentSpec> {
        let o = |name: &'static str, material, count: usize, base_scale: f32, radius_scale: f32| OrnamentSpec {
            name, material, count, base_scale, radius_scale,
        };
        vec![
            o("gift boxes", MaterialClass::GiftBox,  12,  0.7,  1.0),
            o("gloss orbs", MaterialClass::OrbGloss, 15,  0.45, 1.0),
            o("matte orbs", MaterialClass::OrbMatte, 10,  0.45, 1.0),
            o("lights",     MaterialClass::Light,    120, 0.08, 0.7),
            o("dust",       MaterialClass::Dust,     600, 0.03, 1.1),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSpec {
    pub chaos:            Shell,
    pub tree:             Cone,
    pub foliage_count:    usize,
    pub ornaments:        Vec<OrnamentSpec>,
    /// Fraction of the tree height ornaments may climb to.
    pub ornament_top:     f32,
    pub gift_count:       usize,
    pub floor_dust_count: usize,
    pub photo_count:      usize,
}

impl Default for SceneSpec {
    fn default() -> Self {
        SceneSpec {
            chaos:            Shell::new(15.0, 20.0),
            tree:             Cone::new(5.0, 12.0),
            foliage_count:    8000,
            ornaments:        OrnamentSpec::defaults(),
            ornament_top:     0.85,
            gift_count:       12,
            floor_dust_count: 200,
            photo_count:      9,
        }
    }
}

impl SceneSpec {
    /// Where grounded groups stand: the base of the tree.
    pub fn floor(&self) -> Vec3 {
        Vec3::new(0.0, -self.tree.height / 2.0, 0.0)
    }

    /// Where the star sits: the apex.
    pub fn crown(&self) -> Vec3 {
        Vec3::new(0.0, self.tree.apex_y(), 0.0)
    }
}

pub struct Scene {
    groups:       Vec<ElementGroup>,
    spec:         SceneSpec,
    star_outline: Vec<Vec2>,
    anchors:      Vec<Vec3>,
    string:       Vec<Vec3>,
}

impl Scene {
    /// Build every group.  Groups with a zero count are left out.
    pub fn build<R: Rng + ?Sized>(rng: &mut R, spec: &SceneSpec) -> Result<Self, GroupError> {
        let mut groups = Vec::new();
        let chaos = Layout::Shell(spec.chaos);

        if spec.foliage_count > 0 {
            groups.push(foliage(rng, spec.foliage_count, spec)?);
        }

        for o in spec.ornaments.iter().filter(|o| o.count > 0) {
            let cone = Cone::new(spec.tree.base_radius * o.radius_scale, spec.tree.height);
            groups.push(ElementGroup::generate(
                rng, o.name, o.count,
                chaos.clone(),
                Layout::Spiral { cone, params: SpiralParams::surface().with_height_cap(spec.ornament_top) },
                SizeSpec::Uniform { min: 0.5, max: 1.5 },
                MaterialSpec::Uniform(o.material),
                BlendProfile::ornament(o.base_scale),
            )?);
        }

        groups.push(ElementGroup::generate(
            rng, STAR, 1,
            Layout::Fixed(Vec3::ZERO), Layout::Fixed(Vec3::ZERO),
            SizeSpec::Constant(1.0),
            MaterialSpec::Uniform(MaterialClass::Star),
            BlendProfile::crown(spec.crown()),
        )?);

        if spec.gift_count > 0 {
            let ring  = gift_ring(rng, spec.gift_count, &GiftRing::default())?;
            let pair  = DualSet::new(ring.positions.clone(), ring.positions)?;
            let attrs = ElementAttributes::sample(
                rng, &pair,
                &SizeSpec::Uniform { min: 0.8, max: 1.4 },
                &MaterialSpec::Cycle(vec![
                    MaterialClass::PresentVelvet,
                    MaterialClass::PresentSatin,
                    MaterialClass::PresentMetal,
                ]),
            );
            groups.push(
                ElementGroup::from_pair(GIFTS, pair, attrs, BlendProfile::grounded(spec.floor(), 0.4))?
                    .with_orientations(ring.rotations.clone(), ring.rotations)?,
            );
        }

        if spec.floor_dust_count > 0 {
            let ring  = scatter_ring(rng, spec.floor_dust_count, &ScatterRing::default())?;
            let pair  = DualSet::new(ring.clone(), ring)?;
            let attrs = ElementAttributes::sample(
                rng, &pair,
                &SizeSpec::Uniform { min: 0.02, max: 0.05 },
                &MaterialSpec::Uniform(MaterialClass::FloorDust),
            );
            groups.push(ElementGroup::from_pair(
                FLOOR_DUST, pair, attrs, BlendProfile::grounded(spec.floor(), 0.0),
            )?);
        }

        if spec.photo_count > 0 {
            let n       = spec.photo_count;
            let gallery = gallery_ring(n, &GalleryRing::default())?;
            let spiral  = photo_spiral(rng, n, &PhotoSpiral { cone: spec.tree, ..Default::default() })?;
            let pair    = DualSet::new(gallery.positions, spiral.positions)?;
            let mut attrs = ElementAttributes::uniform(n);
            attrs.material = vec![MaterialClass::PhotoFrame; n];
            groups.push(
                ElementGroup::from_pair(PHOTOS, pair, attrs, BlendProfile::gallery(2.5, 0.8))?
                    .with_orientations(gallery.rotations, spiral.rotations)?,
            );
        }

        Ok(Scene {
            groups,
            spec:         spec.clone(),
            star_outline: star_outline(5, 0.4, 1.0),
            anchors:      Vec::with_capacity(spec.photo_count),
            string:       Vec::with_capacity(STRING_SEGMENTS + 1),
        })
    }

    /// Rewrite every transform buffer and the photo string.
    pub fn update(&mut self, progress: f32, time: f32) {
        for g in &mut self.groups {
            g.update(progress, time);
        }
        self.anchors.clear();
        self.string.clear();
        if let Some(photos) = self.groups.iter().find(|g| g.name() == PHOTOS) {
            attachment_points(photos.transforms(), Vec3::Y * ATTACHMENT_HEIGHT, &mut self.anchors);
            catmull_rom(&self.anchors, STRING_SEGMENTS, &mut self.string);
        }
    }

    /// Change the foliage count.  Returns whether anything was rebuilt.
    pub fn set_foliage_count<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<bool, GroupError> {
        let Some(g) = self.groups.iter_mut().find(|g| g.name() == FOLIAGE) else {
            return Ok(false);
        };
        let (dispersed, formed) = foliage_layouts(&self.spec);
        let changed = g.regenerate(rng, count, dispersed, formed)?;
        self.spec.foliage_count = g.len();
        Ok(changed)
    }

    pub fn groups(&self) -> &[ElementGroup] { &self.groups }
    pub fn group(&self, name: &str) -> Option<&ElementGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }
    pub fn spec(&self) -> &SceneSpec { &self.spec }
    pub fn star_outline(&self) -> &[Vec2] { &self.star_outline }
    pub fn string(&self) -> &[Vec3] { &self.string }

    pub fn element_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }
}

fn foliage_layouts(spec: &SceneSpec) -> (Layout, Layout) {
    (
        Layout::Shell(spec.chaos),
        Layout::Spiral { cone: spec.tree, params: SpiralParams::volume() },
    )
}

fn foliage<R: Rng + ?Sized>(rng: &mut R, count: usize, spec: &SceneSpec) -> Result<ElementGroup, GroupError> {
    let (dispersed, formed) = foliage_layouts(spec);
    ElementGroup::generate(
        rng, FOLIAGE, count, dispersed, formed,
        SizeSpec::HeightGraded { cone: spec.tree, bottom: 0.2, top: 0.1, noise: 0.05 },
        MaterialSpec::Uniform(MaterialClass::Foliage),
        BlendProfile::particle(),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
