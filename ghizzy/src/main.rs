//! ghizzy: run one perception-to-actuator demo.

use std::io;
use std::process;

use clap::Parser;
use ghizzy::app;
use ghizzy::config::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║          Ghizzy · perception-driven actuators        ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "serial")]
    println!("  Board: USB serial{}", if cli.simulate { " (overridden by --simulate)" } else { "" });
    #[cfg(not(feature = "serial"))]
    println!("  Board: simulated  (use --features serial for hardware)");
    println!("  Behavior: {}", cli.behavior.name());
    println!();

    match app::run(&cli) {
        Ok(stats) => {
            println!();
            println!(
                "  {} iterations, {} transitions ({:?}).",
                stats.iterations, stats.transitions, stats.end
            );
            println!();
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
