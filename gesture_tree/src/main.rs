//! gesture_tree — interactive entry point.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gesture_tree::app::{run, run_headless};
use gesture_tree::config::{BackendKind, Settings};
use gesture_tree::error::AppError;

#[derive(Parser, Debug)]
#[command(name = "gesture_tree", version, about = "Hand-gesture controlled particle tree")]
struct Cli {
    /// TOML config file (default: gesture_tree.toml if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the config file and environment; built-in defaults only.
    #[arg(long)]
    quick: bool,

    /// Gesture backend.
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Run this many frames without a window and print a summary.
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Seed for the procedural layouts.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Gesture Tree — Dual-State Particle Choreography       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    if let Err(e) = start(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn start(cli: Cli) -> Result<(), AppError> {
    let mut settings = if cli.quick {
        println!("  Quick-start: built-in defaults\n");
        Settings::default()
    } else {
        Settings::load(cli.config.as_deref())?
    };
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    settings.validate()?;

    match settings.backend {
        BackendKind::Sim      => println!("  Mode: keyboard/mouse simulation  (O open, C fist, mouse = hand)"),
        BackendKind::Scripted => println!("  Mode: scripted open/close cycle"),
        BackendKind::Leap     => println!("  Mode: LeapMotion hardware"),
    }
    println!();

    match cli.headless {
        Some(frames) => {
            let summary = run_headless(&settings, frames)?;
            println!(
                "  {} frames, {} transitions, final state {} at progress {:.3}",
                summary.frames,
                summary.transitions,
                summary.final_state.state.name(),
                summary.final_state.progress,
            );
            Ok(())
        }
        None => {
            info!(backend = ?settings.backend, camera = settings.camera_mode.name(), "opening visualizer window");
            run(&settings)
        }
    }
}
