//! grove_control — interactive entry point.

use grove_control::app::{run, AppConfig};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║      Grove Control — Gesture-Driven Particle Tree Scene      ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Landmark input: keyboard simulation (a webcam detector plugs");
    println!("  into the same LandmarkSource seam).");
    println!();

    let pointer_only = std::env::args().any(|a| a == "--pointer");
    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 12 photos, snow off\n");
        AppConfig { pointer_only, ..AppConfig::default() }
    } else {
        configure_interactively(pointer_only)
    };

    println!();
    println!("  Opening scene window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively(pointer_only: bool) -> AppConfig {
    let photo_count: usize = {
        let n = read_line("  Photo panels 1–64 (default 12): ")
            .trim()
            .parse()
            .unwrap_or(12);
        n.clamp(1, 64)
    };

    let snow_on_start = matches!(
        read_line("  Snow on at start? y/N: ").trim(),
        "y" | "Y" | "yes"
    );

    AppConfig {
        photo_count,
        snow_on_start,
        pointer_only,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
