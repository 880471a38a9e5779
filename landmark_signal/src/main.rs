//! signal_probe: print per-frame signals from a recorded observation stream.
//!
//! Handy for tuning thresholds offline:
//!
//! ```text
//! signal_probe recording.jsonl --frame-width 640
//! some-landmarker | signal_probe -
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

use clap::Parser;
use landmark_signal::{
    count_fingers, index_tip_px, mouth_open_ratio, smile_score, Observation,
};

#[derive(Parser)]
#[command(version, about = "Print finger count, index-tip x, mouth ratio and smile score per frame")]
struct Args {
    /// Observation stream, one JSON object per line; `-` reads stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Frame width used to convert the index tip to pixels.
    #[arg(long, default_value_t = 640)]
    frame_width: u32,
}

fn main() {
    let args = Args::parse();

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(&args.input) {
            Ok(f)  => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("Error: cannot open '{}': {}", args.input, e);
                process::exit(1);
            }
        }
    };

    println!("{:>6}  {:>5}  {:>7}  {:>6}  {:>6}  {:>6}", "line", "hand", "fingers", "tip_x", "mouth", "smile");

    for (n, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l)  => l,
            Err(e) => { eprintln!("Error: read failed: {}", e); process::exit(1); }
        };
        if line.trim().is_empty() { continue; }

        let obs = match Observation::from_json(&line) {
            Ok(o)  => o,
            Err(e) => { eprintln!("  line {}: {}", n + 1, e); continue; }
        };

        let (hand, fingers, tip) = match &obs.hand {
            Some(h) => (
                h.handedness.name().to_string(),
                count_fingers(h).map(|c| c.to_string()).unwrap_or_else(|_| "?".into()),
                index_tip_px(h, args.frame_width).map(|x| x.to_string()).unwrap_or_else(|_| "?".into()),
            ),
            None => ("-".into(), "-".into(), "-".into()),
        };

        let (mouth, smile) = match &obs.face {
            Some(f) => (
                mouth_open_ratio(f).map(|r| format!("{:.3}", r)).unwrap_or_else(|_| "?".into()),
                format!("{:.3}", smile_score(f)),
            ),
            None => ("-".into(), "-".into()),
        };

        println!("{:>6}  {:>5}  {:>7}  {:>6}  {:>6}  {:>6}", n + 1, hand, fingers, tip, mouth, smile);
    }
}
