//! duelink_console: type raw commands at a board.
//!
//! Lines are sent through a [`Link`], so `sel n` style shortcuts keep the
//! selection memoised exactly as the demos do.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use duelink_link::{Command, Link, LinkError, SimulatedBoard, Transport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Interactive console for DUELink boards")]
struct Args {
    /// Serial port of the board; discovered by USB id when omitted.
    #[arg(long, env = "GHIZZY_PORT")]
    port: Option<String>,

    /// Use an in-memory board even when built with `serial`.
    #[arg(long)]
    simulate: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║                 DUELink Console                      ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let transport = match open_transport(&args) {
        Ok(t)  => t,
        Err(e) => { eprintln!("Error: {}", e); process::exit(1); }
    };
    let mut link = Link::new(transport);

    println!("  Commands: `sel N` or `sel(N)` selects a module, anything else is sent verbatim.");
    println!("  q quits.\n");

    loop {
        let line = read_line(&format!("[{}]> ", link.current_address()));
        let line = line.trim();
        match line {
            ""                 => continue,
            "q" | "quit" => { println!("\nGoodbye!\n"); break; }
            _ => {}
        }

        let result = match Command::parse_select(line) {
            Some(Ok(addr)) => link.select(addr).map(|_| String::new()),
            Some(Err(_))   => { println!("  ⚠  Address must be 0–255."); continue; }
            None           => link.send_raw(line),
        };

        match result {
            Ok(reply) if reply.is_empty() => {}
            Ok(reply) => println!("  {}", reply),
            Err(e) => {
                eprintln!("  ⚠  {}", e);
                if matches!(e, LinkError::Disconnected) { process::exit(1); }
            }
        }
    }
}

#[cfg(feature = "serial")]
fn open_transport(args: &Args) -> Result<Box<dyn Transport>, LinkError> {
    use duelink_link::serial::SerialTransport;

    if args.simulate {
        return Ok(Box::new(SimulatedBoard::new()));
    }
    let t = match &args.port {
        Some(p) => SerialTransport::open(p)?,
        None    => SerialTransport::discover()?,
    };
    Ok(Box::new(t))
}

#[cfg(not(feature = "serial"))]
fn open_transport(args: &Args) -> Result<Box<dyn Transport>, LinkError> {
    if !args.simulate {
        tracing::warn!("built without the `serial` feature; using a simulated board");
    }
    if let Some(p) = &args.port {
        tracing::warn!("ignoring --port {}", p);
    }
    Ok(Box::new(SimulatedBoard::new()))
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf).unwrap_or(0) == 0 {
        return "q".to_string();
    }
    buf
}
