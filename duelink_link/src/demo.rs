//! Demonstrates the command vocabulary and select memoisation on a
//! simulated board.

use duelink_link::{Command, Link, Rgb, SimulatedBoard};

fn main() {
    println!("\n=== DUELink Link Demo ===\n");

    // ── 1. Wire text ──────────────────────────────────────────────────────
    println!("1. Command wire text");
    for c in [
        Command::Select(2),
        Command::Servo { pin: 1, angle: 90 },
        Command::Fan(60),
        Command::Distance,
        Command::RightEye(Rgb::WHITE),
        Command::LeftEye(Rgb::OFF),
        Command::StatusLed { high: 1, low: 0, count: 0 },
    ] {
        println!("   {:<45} → {}", format!("{:?}", c), c);
    }
    println!();

    // ── 2. Memoised select ────────────────────────────────────────────────
    println!("2. Three servo moves and a distance read");
    let mut link = Link::new(SimulatedBoard::with_readings([27]));
    for angle in [20, 25, 30] {
        link.set_servo(1, angle).unwrap();
    }
    let d = link.read_distance(2).unwrap();
    println!("   distance = {} cm", d);
    println!("   lines sent:");
    for line in link.transport().history() {
        println!("     {}", line);
    }
    println!();
}
