//! Demonstrates every layout family with a fixed seed.

use cloud_layout::ring::{gallery_ring, gift_ring, photo_spiral, scatter_ring, star_outline,
                         GalleryRing, GiftRing, PhotoSpiral, ScatterRing};
use cloud_layout::{dispersed_shell, formed_surface, formed_volume, Cone, PositionSet, Shell};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn show(label: &str, set: &PositionSet) {
    let (lo, hi) = set.radius_range().unwrap_or((0.0, 0.0));
    println!("   {:<24} n={:<5} |p| {:.2}…{:.2}", label, set.len(), lo, hi);
}

fn main() -> Result<(), cloud_layout::LayoutError> {
    println!("\n=== Particle Tree Layout Demo ===\n");
    let mut rng = StdRng::seed_from_u64(2024);
    let cone = Cone::new(5.0, 12.0);

    // ── 1. The two states of the foliage ─────────────────────────────────
    println!("1. Foliage");
    show("dispersed shell 15..20", &dispersed_shell(&mut rng, 8000, Shell::new(15.0, 20.0))?);
    show("spiral volume", &formed_volume(&mut rng, 8000, cone)?);
    println!();

    // ── 2. Ornaments hug the surface below 85% ───────────────────────────
    println!("2. Ornaments");
    let surface = formed_surface(&mut rng, 120, cone, 0.85)?;
    show("spiral surface", &surface);
    if let Some((lo, hi)) = surface.bounds() {
        println!("   height range {:.2}…{:.2} (apex at {:.2})", lo.y, hi.y, cone.apex_y());
    }
    println!();

    // ── 3. Photo frames ──────────────────────────────────────────────────
    println!("3. Photo frames");
    show("gallery ring", &gallery_ring(9, &GalleryRing::default())?.positions);
    show("photo spiral", &photo_spiral(&mut rng, 9, &PhotoSpiral::default())?.positions);
    println!();

    // ── 4. Under the tree ────────────────────────────────────────────────
    println!("4. Grounded");
    show("gift ring", &gift_ring(&mut rng, 12, &GiftRing::default())?.positions);
    show("floor scatter", &scatter_ring(&mut rng, 200, &ScatterRing::default())?);
    println!();

    println!("5. Star outline: {} vertices\n", star_outline(5, 0.4, 1.0).len());
    Ok(())
}
