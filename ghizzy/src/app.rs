//! Wires the command line to a transport, a perception source and a
//! behavior, then runs the session.

use std::io::{self, BufReader};
use std::time::Duration;

use duelink_link::{Link, LinkError, SimulatedBoard, Transport};

use crate::behavior::{Behavior, FingerBlink, MotionBlink, MouthWatch, SmileBlink};
use crate::cancel::{spawn_quit_listener, CancelToken};
use crate::config::{fan_follow_config, BehaviorCmd, Cli, StreamArgs};
use crate::error::GhizzyError;
use crate::fan_follow::FanFollow;
use crate::perception::{PerceptionSource, ReplaySource};
use crate::session::{run_fan_follow, run_until_cancelled, SessionStats};

// ════════════════════════════════════════════════════════════════════════════
// Transport
// ════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "serial")]
pub fn open_transport(cli: &Cli) -> Result<Box<dyn Transport>, LinkError> {
    use duelink_link::serial::SerialTransport;

    if cli.simulate {
        return Ok(Box::new(simulated(cli)));
    }
    let t = match &cli.port {
        Some(p) => SerialTransport::open(p)?,
        None    => SerialTransport::discover()?,
    };
    Ok(Box::new(t))
}

#[cfg(not(feature = "serial"))]
pub fn open_transport(cli: &Cli) -> Result<Box<dyn Transport>, LinkError> {
    if !cli.simulate {
        tracing::warn!("built without the `serial` feature; using a simulated board");
    }
    if let Some(p) = &cli.port {
        tracing::warn!("ignoring --port {}", p);
    }
    Ok(Box::new(simulated(cli)))
}

fn simulated(cli: &Cli) -> SimulatedBoard {
    SimulatedBoard::with_readings(cli.behavior.sim_readings()).cycling()
}

// ════════════════════════════════════════════════════════════════════════════
// Perception
// ════════════════════════════════════════════════════════════════════════════

pub fn open_source(args: &StreamArgs) -> Result<Box<dyn PerceptionSource>, GhizzyError> {
    let mode = args.running_mode();
    if args.reads_stdin() {
        let src = ReplaySource::new(io::stdin().lock(), mode).mirrored(args.mirror);
        return Ok(Box::new(src));
    }
    let src = ReplaySource::open(&args.frames, mode).map_err(|source| GhizzyError::OpenStream {
        path: args.frames.display().to_string(),
        source,
    })?;
    Ok(Box::new(src.mirrored(args.mirror)))
}

// ════════════════════════════════════════════════════════════════════════════
// run
// ════════════════════════════════════════════════════════════════════════════

/// Run the behavior named on the command line until `q`, end of stream or
/// the first error.
pub fn run(cli: &Cli) -> Result<SessionStats, GhizzyError> {
    let mut link = Link::new(open_transport(cli)?);
    let cancel = CancelToken::new();

    // Stdin is the observation stream in that case; Ctrl-C stops the run.
    if !cli.behavior.stream().is_some_and(StreamArgs::reads_stdin) {
        println!("  Type q + Enter to stop.\n");
        spawn_quit_listener(cancel.clone());
    }

    let mut out = io::stdout().lock();
    match &cli.behavior {
        BehaviorCmd::FanFollow { threshold_cm, fan_speed, sweep_ms, track_ms, .. } => {
            let cfg = fan_follow_config(*threshold_cm, *fan_speed, *sweep_ms, *track_ms);
            run_fan_follow(&mut FanFollow::new(cfg), &mut link, &cancel, &mut out)
        }
        BehaviorCmd::FingerCount { stream, blink_ms } => {
            let b = FingerBlink::new(Duration::from_millis(*blink_ms));
            drive(stream, b, &mut link, &cancel, &mut out)
        }
        BehaviorCmd::HandMotion { stream, threshold_px, frame_width } => {
            let b = MotionBlink::new(*threshold_px, *frame_width);
            drive(stream, b, &mut link, &cancel, &mut out)
        }
        BehaviorCmd::Mouth { stream, ratio } => {
            drive(stream, MouthWatch::new(*ratio), &mut link, &cancel, &mut out)
        }
        BehaviorCmd::Smile { stream, cutoff } => {
            drive(stream, SmileBlink::new(*cutoff), &mut link, &cancel, &mut out)
        }
    }
}

fn drive<B: Behavior, T: Transport, W: io::Write>(
    stream:       &StreamArgs,
    mut behavior: B,
    link:         &mut Link<T>,
    cancel:       &CancelToken,
    out:          &mut W,
) -> Result<SessionStats, GhizzyError> {
    let mut source = open_source(stream)?;
    run_until_cancelled(source.as_mut(), &mut behavior, link, cancel, out)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::RunningMode;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn missing_stream_file_is_reported_with_its_path() {
        let args = StreamArgs {
            frames:     PathBuf::from("/nonexistent/ghizzy/frames.jsonl"),
            image_mode: false,
            mirror:     false,
        };
        match open_source(&args) {
            Err(GhizzyError::OpenStream { path, .. }) => assert!(path.ends_with("frames.jsonl")),
            Err(e) => panic!("unexpected error {}", e),
            Ok(_)  => panic!("expected an error"),
        }
    }

    #[test]
    fn stream_file_is_replayed() {
        let path = std::env::temp_dir().join(format!("ghizzy-app-{}.jsonl", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "{{\"timestamp_ms\":1}}").unwrap();
        writeln!(f, "{{\"timestamp_ms\":2}}").unwrap();
        drop(f);

        let args = StreamArgs { frames: path.clone(), image_mode: false, mirror: false };
        assert_eq!(args.running_mode(), RunningMode::Video);
        let mut src = open_source(&args).unwrap();
        assert!(src.next_observation().unwrap().is_some());
        assert!(src.next_observation().unwrap().is_some());
        assert!(src.next_observation().unwrap().is_none());
        std::fs::remove_file(path).ok();
    }
}
