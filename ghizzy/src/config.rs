//! Command-line configuration.
//!
//! ```text
//! ghizzy [--port P] [--simulate] [-v] <behavior> [options]
//! ```
//!
//! Every threshold and pacing value defaults to the tuning the demos were
//! built with; flags exist to retune without a rebuild.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use landmark_signal::face::{MOUTH_OPEN_RATIO, SMILE_CUTOFF};
use landmark_signal::motion::MOVE_THRESHOLD_PX;

use crate::behavior::hand_motion::FRAME_WIDTH;
use crate::fan_follow::{FanFollowConfig, Pacing};
use crate::perception::RunningMode;

/// Distance script for the simulated sensor: far, far, far, close enough
/// to start tracking, still close, then gone again.
pub const SIM_READINGS: &[i32] = &[40, 40, 40, 12, 10, 11, 30];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ghizzy",
    version,
    about = "Perception-driven actuator demos for the Ghizzy head and DUELink modules"
)]
pub struct Cli {
    /// Serial port of the board; discovered by USB id when omitted.
    #[arg(long, global = true, env = "GHIZZY_PORT")]
    pub port: Option<String>,

    /// Use an in-memory board even when built with `serial`.
    #[arg(long, global = true)]
    pub simulate: bool,

    /// Log every command written to the board.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub behavior: BehaviorCmd,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BehaviorCmd {
    /// Sweep a distance sensor and point the fan at anything close.
    FanFollow {
        /// Readings below this many centimetres (and above zero) are in range.
        #[arg(long, default_value_t = 15)]
        threshold_cm: i32,

        /// Fan speed in percent while tracking.
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(0..=100))]
        fan_speed: u8,

        /// Comma-separated distance readings for the simulated sensor.
        #[arg(long, value_delimiter = ',')]
        sim_readings: Vec<i32>,

        /// Milliseconds between sweep steps.
        #[arg(long, default_value_t = 100)]
        sweep_ms: u64,

        /// Milliseconds between sensor polls while tracking.
        #[arg(long, default_value_t = 80)]
        track_ms: u64,
    },

    /// Blink the eyes once per extended finger.
    FingerCount {
        #[command(flatten)]
        stream: StreamArgs,

        /// Milliseconds between the halves of a blink.
        #[arg(long, default_value_t = 50)]
        blink_ms: u64,
    },

    /// Flicker the eyes when the index finger moves sideways.
    HandMotion {
        #[command(flatten)]
        stream: StreamArgs,

        /// Horizontal jump, in pixels, that counts as motion.
        #[arg(long, default_value_t = MOVE_THRESHOLD_PX)]
        threshold_px: i32,

        /// Width of the capture the landmarks were taken from.
        #[arg(long, default_value_t = FRAME_WIDTH)]
        frame_width: u32,
    },

    /// Eyes on while the mouth is open.
    Mouth {
        #[command(flatten)]
        stream: StreamArgs,

        /// Lip gap / mouth width above which the mouth is open.
        #[arg(long, default_value_t = MOUTH_OPEN_RATIO)]
        ratio: f32,
    },

    /// Animate eyes and status LED while smiling.
    Smile {
        #[command(flatten)]
        stream: StreamArgs,

        /// Mean smile score above which the face is smiling.
        #[arg(long, default_value_t = SMILE_CUTOFF)]
        cutoff: f64,
    },
}

/// Where observations come from.
#[derive(Args, Debug, Clone)]
pub struct StreamArgs {
    /// JSON-lines observation stream; `-` reads stdin.
    #[arg(long, env = "GHIZZY_FRAMES", default_value = "-")]
    pub frames: PathBuf,

    /// Treat observations as independent stills (no timestamp checks).
    #[arg(long)]
    pub image_mode: bool,

    /// Flip observations horizontally (selfie view).
    #[arg(long)]
    pub mirror: bool,
}

impl StreamArgs {
    pub fn reads_stdin(&self) -> bool {
        self.frames.as_os_str() == "-"
    }

    pub fn running_mode(&self) -> RunningMode {
        if self.image_mode { RunningMode::Image } else { RunningMode::Video }
    }
}

impl BehaviorCmd {
    pub fn name(&self) -> &'static str {
        match self {
            BehaviorCmd::FanFollow { .. }   => "fan-follow",
            BehaviorCmd::FingerCount { .. } => "finger-count",
            BehaviorCmd::HandMotion { .. }  => "hand-motion",
            BehaviorCmd::Mouth { .. }       => "mouth",
            BehaviorCmd::Smile { .. }       => "smile",
        }
    }

    /// Observation stream options; `None` for fan-follow.
    pub fn stream(&self) -> Option<&StreamArgs> {
        match self {
            BehaviorCmd::FanFollow { .. } => None,
            BehaviorCmd::FingerCount { stream, .. }
            | BehaviorCmd::HandMotion { stream, .. }
            | BehaviorCmd::Mouth { stream, .. }
            | BehaviorCmd::Smile { stream, .. } => Some(stream),
        }
    }

    /// Distance script for the simulated board.
    pub fn sim_readings(&self) -> Vec<i32> {
        match self {
            BehaviorCmd::FanFollow { sim_readings, .. } if !sim_readings.is_empty() =>
                sim_readings.clone(),
            _ => SIM_READINGS.to_vec(),
        }
    }
}

/// Fan-follow tuning from the command line, on top of the default rig.
pub fn fan_follow_config(threshold_cm: i32, fan_speed: u8, sweep_ms: u64, track_ms: u64) -> FanFollowConfig {
    FanFollowConfig {
        threshold_cm,
        fan_speed,
        pacing: Pacing {
            sweep: Duration::from_millis(sweep_ms),
            track: Duration::from_millis(track_ms),
        },
        ..FanFollowConfig::default()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
