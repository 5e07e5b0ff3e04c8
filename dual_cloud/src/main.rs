//! Interactive menu for stepping an element group between its dispersed and
//! formed states and inspecting the resulting transforms.

use cloud_layout::{Cone, Layout, Shell, SpiralParams};
use dual_cloud::{
    BlendProfile, Easing, ElementGroup, MaterialClass, MaterialSpec, SizeSpec,
};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║             Dual-State Element Group Explorer            ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    let mut rng = rand::thread_rng();
    let cone    = Cone::new(5.0, 12.0);
    let shell   = Layout::Shell(Shell::new(15.0, 20.0));

    let count: usize = read_line("  Element count (default 500): ")
        .trim().parse().unwrap_or(500);
    let (profile, formed) = pick_profile(cone);

    let mut group = match ElementGroup::generate(
        &mut rng, "explorer", count.max(1), shell.clone(), formed.clone(),
        SizeSpec::Uniform { min: 0.5, max: 1.5 },
        MaterialSpec::Cycle(vec![MaterialClass::OrbGloss, MaterialClass::OrbMatte]),
        profile,
    ) {
        Ok(g)  => g,
        Err(e) => { println!("  ⚠  {}", e); return; }
    };

    let mut progress = 1.0f32;
    let mut time     = 0.0f32;
    println!("\n  ✓  {} elements, easing {}\n", group.len(), group.profile().easing.name());

    loop {
        print_ops_menu();
        let choice = read_line("Command: ").trim().to_ascii_lowercase();

        match choice.as_str() {
            "1" => {
                progress = read_line("  Progress (0–1): ").trim().parse::<f32>()
                    .unwrap_or(progress).clamp(0.0, 1.0);
                show(&mut group, progress, time, 5);
            }
            "2" => {
                let target: f32 = if progress >= 0.5 { 0.0 } else { 1.0 };
                let steps = 8;
                println!("  Sweeping {:.2} → {:.2}", progress, target);
                for s in 0..=steps {
                    let p = progress + (target - progress) * s as f32 / steps as f32;
                    let pos = group.update(p, time)[0].position;
                    println!("    p={:.3}  eased={:.3}  [0] ({:>7.3}, {:>7.3}, {:>7.3})",
                             p, group_ease(&group, p), pos.x, pos.y, pos.z);
                }
                progress = target;
            }
            "3" => {
                time = read_line("  Elapsed seconds: ").trim().parse().unwrap_or(time);
                show(&mut group, progress, time, 5);
            }
            "4" => {
                let n: usize = read_line("  New count: ").trim().parse().unwrap_or(group.len());
                match group.regenerate(&mut rng, n.max(1), shell.clone(), formed.clone()) {
                    Ok(true)  => println!("  Regenerated {} elements.", group.len()),
                    Ok(false) => println!("  Unchanged."),
                    Err(e)    => println!("  ⚠  {}", e),
                }
            }
            "5" => {
                println!("  Easing curves at p = {:.2}:", progress);
                for e in Easing::all() {
                    println!("    {:<14} {:.4}", e.name(), e.apply(progress));
                }
            }
            "6" => {
                println!("  {} · {} elements · progress {:.2} · t {:.2}s",
                         group.name(), group.len(), progress, time);
            }
            "q" | "quit" => {
                println!("\nGoodbye!\n");
                break;
            }
            _ => println!("  ⚠  Unknown command."),
        }
        println!();
    }
}

fn group_ease(group: &ElementGroup, p: f32) -> f32 {
    group.profile().easing.apply(p)
}

fn show(group: &mut ElementGroup, progress: f32, time: f32, n: usize) {
    let t = group.update(progress, time);
    for (i, tr) in t.iter().take(n).enumerate() {
        println!("    [{:>3}] pos ({:>7.3}, {:>7.3}, {:>7.3})  rot ({:>5.2}, {:>5.2}, {:>5.2})  scale {:.3}",
                 i, tr.position.x, tr.position.y, tr.position.z,
                 tr.rotation.x, tr.rotation.y, tr.rotation.z, tr.scale);
    }
}

fn print_ops_menu() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  1. Set progress              4. Regenerate with count  │");
    println!("  │  2. Sweep to other state      5. Compare easing curves  │");
    println!("  │  3. Set elapsed time          6. Status    q. Quit      │");
    println!("  └─────────────────────────────────────────────────────────┘");
}

fn pick_profile(cone: Cone) -> (BlendProfile, Layout) {
    loop {
        println!("  Blend profile:");
        println!("    1. particle  (spiral volume, jitter)");
        println!("    2. ornament  (spiral surface, spin)");
        println!("    3. linear    (spiral volume, no easing)");
        let volume  = Layout::Spiral { cone, params: SpiralParams::volume() };
        let surface = Layout::Spiral { cone, params: SpiralParams::surface() };
        match read_line("  Choice (1–3): ").trim() {
            "1" => return (BlendProfile::particle(), volume),
            "2" => return (BlendProfile::ornament(0.45), surface),
            "3" => return (BlendProfile { easing: Easing::Linear, ..Default::default() }, volume),
            _   => println!("  ⚠  Please enter 1–3.\n"),
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
