//! Demonstrates element groups blending between their two states.

use cloud_layout::ring::{gallery_ring, photo_spiral, GalleryRing, PhotoSpiral};
use cloud_layout::{Cone, Layout, Shell, SpiralParams};
use dual_cloud::curve::{attachment_points, catmull_rom, ATTACHMENT_HEIGHT};
use dual_cloud::{
    BlendProfile, DualSet, ElementAttributes, ElementGroup, GroupError, MaterialClass,
    MaterialSpec, SizeSpec, Transform,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn show(label: &str, t: &[Transform]) {
    let c = t.iter().map(|t| t.position).sum::<Vec3>() / t.len().max(1) as f32;
    let mean_r = t.iter().map(|t| t.position.length()).sum::<f32>() / t.len().max(1) as f32;
    println!("   {:<18} centroid ({:>6.2}, {:>6.2}, {:>6.2})  mean |p| {:.2}",
             label, c.x, c.y, c.z, mean_r);
}

fn main() -> Result<(), GroupError> {
    println!("\n=== Element Group Blend Demo ===\n");
    let mut rng = StdRng::seed_from_u64(7);
    let cone = Cone::new(5.0, 12.0);

    // ── 1. Foliage from chaos to cone ────────────────────────────────────
    println!("1. Foliage, 8000 particles");
    let mut foliage = ElementGroup::generate(
        &mut rng, "foliage", 8000,
        Layout::Shell(Shell::new(15.0, 20.0)),
        Layout::Spiral { cone, params: SpiralParams::volume() },
        SizeSpec::HeightGraded { cone, bottom: 0.2, top: 0.1, noise: 0.05 },
        MaterialSpec::Uniform(MaterialClass::Foliage),
        BlendProfile::particle(),
    )?;
    for p in [0.0, 0.25, 0.5, 0.75, 1.0] {
        show(&format!("progress {:.2}", p), foliage.update(p, 0.0));
    }
    println!();

    // ── 2. Ornaments spin while they travel ──────────────────────────────
    println!("2. Gloss orbs");
    let mut orbs = ElementGroup::generate(
        &mut rng, "orbs", 15,
        Layout::Shell(Shell::new(15.0, 20.0)),
        Layout::Spiral { cone, params: SpiralParams::surface() },
        SizeSpec::Uniform { min: 0.5, max: 1.5 },
        MaterialSpec::Uniform(MaterialClass::OrbGloss),
        BlendProfile::ornament(0.45),
    )?;
    for time in [0.0, 1.0, 2.0] {
        let t = orbs.update(1.0, time);
        println!("   t={:.1}s  orb[0] rot ({:.2}, {:.2})  scale {:.3}",
                 time, t[0].rotation.x, t[0].rotation.y, t[0].scale);
    }
    println!();

    // ── 3. Photo frames and their string ─────────────────────────────────
    println!("3. Photo frames");
    let ring   = gallery_ring(9, &GalleryRing::default())?;
    let spiral = photo_spiral(&mut rng, 9, &PhotoSpiral { cone, ..Default::default() })?;
    let pair   = DualSet::new(ring.positions, spiral.positions)?;
    let mut frames = ElementGroup::from_pair(
        "photos", pair, ElementAttributes::uniform(9), BlendProfile::gallery(2.5, 0.8),
    )?
    .with_orientations(ring.rotations, spiral.rotations)?;

    let mut anchors = Vec::new();
    let mut string  = Vec::new();
    for p in [0.0, 1.0] {
        let t = frames.update(p, 0.0);
        attachment_points(t, Vec3::new(0.0, ATTACHMENT_HEIGHT, 0.0), &mut anchors);
        catmull_rom(&anchors, 64, &mut string);
        let len: f32 = string.windows(2).map(|w| w[0].distance(w[1])).sum();
        println!("   progress {:.0}: string through {} frames, {} samples, length {:.2}",
                 p, anchors.len(), string.len(), len);
    }
    println!();
    Ok(())
}
