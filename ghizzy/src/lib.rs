//! # ghizzy
//!
//! Perception-driven actuator demos for the Ghizzy head (eye LEDs, status
//! LED) and DUELink servo, fan and distance modules.
//!
//! Every demo is the same loop: take one landmark observation, extract a
//! signal, compare it with the last one, and send fixed commands to the
//! board when something changed.
//!
//! ## Behaviors
//!
//! | Subcommand | Input | Output |
//! |---|---|---|
//! | `fan-follow` | distance sensor on servo 1 | servo 3 points the fan (module 4) at anything within 15 cm |
//! | `finger-count` | hand landmarks | eyes blink once per extended finger |
//! | `hand-motion` | index-tip x | one eye lights per sideways jump > 8 px |
//! | `mouth` | face landmarks 13/14/61/291 | eyes on while the mouth is open |
//! | `smile` | smile blendshapes | eyes and status LED animate while smiling |
//!
//! ## Observation stream
//!
//! The landmark model runs in a separate process and writes one JSON
//! object per line (see [`landmark_signal::Observation`]). Pass a recording
//! with `--frames`, or pipe it to stdin.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: an in-memory board records commands
//!   and answers `distance()` from a looping script.
//! * `serial`: **Hardware mode**: a real board over USB serial.
//!
//! Type `q` + Enter to stop a run (when stdin is not the observation stream).

pub mod error;
pub mod perception;
pub mod cancel;
pub mod behavior;
pub mod fan_follow;
pub mod session;
pub mod config;
pub mod app;

pub use error::GhizzyError;
pub use cancel::CancelToken;
pub use fan_follow::{FanFollow, FanFollowConfig, Pacing};
pub use perception::{PerceptionSource, ReplaySource, RunningMode, ScriptedSource};
pub use session::{run_fan_follow, run_until_cancelled, SessionEnd, SessionStats};
