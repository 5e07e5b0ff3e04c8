//! Interactive menu for exploring the procedural point layouts.
//! Prints summary statistics for each generated set.

use cloud_layout::{
    dispersed_shell, formed_surface, formed_volume, Cone, PositionSet, Shell,
};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            Particle Tree Layout Explorer             ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let mut rng = rand::thread_rng();

    loop {
        print_menu();
        let choice = read_line("Select a layout (1–3, or q to quit): ");

        if choice.trim().eq_ignore_ascii_case("q") {
            println!("\nGoodbye!\n");
            break;
        }

        let n: usize = read_line("  How many points? (default 2000): ")
            .trim().parse().unwrap_or(2000);
        let n = n.max(1).min(200_000);

        let result = match choice.trim() {
            "1" => {
                let min = read_f32("  Inner radius (default 15): ", 15.0);
                let max = read_f32("  Outer radius (default 20): ", 20.0);
                dispersed_shell(&mut rng, n, Shell::new(min, max))
                    .map(|s| ("dispersed shell", s))
            }
            "2" => {
                let cone = read_cone();
                formed_volume(&mut rng, n, cone).map(|s| ("spiral volume", s))
            }
            "3" => {
                let cone = read_cone();
                let top  = read_f32("  Top fraction (default 0.85): ", 0.85);
                formed_surface(&mut rng, n, cone, top).map(|s| ("spiral surface", s))
            }
            _ => { println!("  ⚠  Please enter 1–3 or q.\n"); continue; }
        };

        match result {
            Ok((name, set)) => report(name, &set),
            Err(e)          => println!("  ⚠  {}\n", e),
        }
    }
}

fn report(name: &str, set: &PositionSet) {
    println!();
    println!("  ┌─ {} ─", name);
    println!("  │  points      : {}", set.len());
    if let Some((lo, hi)) = set.radius_range() {
        println!("  │  |p| range   : {:.3} … {:.3}", lo, hi);
    }
    if let Some((lo, hi)) = set.bounds() {
        println!("  │  bounds min  : ({:.2}, {:.2}, {:.2})", lo.x, lo.y, lo.z);
        println!("  │  bounds max  : ({:.2}, {:.2}, {:.2})", hi.x, hi.y, hi.z);
    }
    println!("  │  all finite  : {}", set.all_finite());
    println!("  │");
    for (i, p) in set.iter().take(5).enumerate() {
        println!("  │  [{:>2}] ({:>7.3}, {:>7.3}, {:>7.3})", i, p.x, p.y, p.z);
    }
    println!("  └─");
    println!();
}

fn print_menu() {
    println!("  ┌──────────────────────────────────────────────────────┐");
    println!("  │  1. Dispersed shell  (chaos)                         │");
    println!("  │  2. Spiral volume    (formed foliage)                │");
    println!("  │  3. Spiral surface   (formed ornaments)              │");
    println!("  └──────────────────────────────────────────────────────┘");
    println!();
}

fn read_cone() -> Cone {
    let base   = read_f32("  Base radius (default 5): ", 5.0);
    let height = read_f32("  Height (default 12): ", 12.0);
    Cone::new(base, height)
}

fn read_f32(prompt: &str, default: f32) -> f32 {
    read_line(prompt).trim().parse().unwrap_or(default)
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
