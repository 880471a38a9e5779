//! Whole sessions: JSON observations in, board commands and transition
//! lines out.

use std::io::Cursor;

use duelink_link::{Link, SimulatedBoard};
use ghizzy::behavior::{FingerBlink, MouthWatch, SmileBlink};
use ghizzy::perception::PerceptionError;
use ghizzy::{
    run_until_cancelled, CancelToken, GhizzyError, PerceptionSource, ReplaySource, RunningMode,
    SessionEnd,
};
use landmark_signal::Observation;

fn replay(lines: &[String]) -> ReplaySource<Cursor<Vec<u8>>> {
    ReplaySource::new(Cursor::new(lines.join("\n").into_bytes()), RunningMode::Video)
}

/// Mouth 50 wide (in 1/1000ths), lips `gap` apart: ratio = gap / 50.
fn mouth_line(ts: u64, gap: u32) -> String {
    let mut points = vec![r#"{"x":0,"y":0}"#.to_string(); 292];
    points[13]  = r#"{"x":0.5,"y":0.5}"#.to_string();
    points[14]  = format!(r#"{{"x":0.5,"y":{}}}"#, 0.5 + gap as f64 / 1000.0);
    points[61]  = r#"{"x":0.475,"y":0.52}"#.to_string();
    points[291] = r#"{"x":0.525,"y":0.52}"#.to_string();
    format!(r#"{{"timestamp_ms":{},"face":{{"landmarks":[{}]}}}}"#, ts, points.join(","))
}

fn smile_line(ts: u64, left: f64, right: f64) -> String {
    format!(
        r#"{{"timestamp_ms":{},"face":{{"landmarks":[],"blendshapes":[{{"category_name":"mouthSmileLeft","score":{}}},{{"category_name":"mouthSmileRight","score":{}}}]}}}}"#,
        ts, left, right
    )
}

#[test]
fn mouth_session_logs_each_transition_once() {
    // Ratios 0.2, 0.4, 0.4, 0.4, 0.2.
    let lines: Vec<_> = [10, 20, 20, 20, 10]
        .iter()
        .enumerate()
        .map(|(i, &gap)| mouth_line(i as u64 * 33, gap))
        .collect();
    let mut src  = replay(&lines);
    let mut link = Link::new(SimulatedBoard::new());
    let mut out  = Vec::new();

    let stats = run_until_cancelled(
        &mut src, &mut MouthWatch::default(), &mut link, &CancelToken::new(), &mut out,
    ).unwrap();

    assert_eq!(stats.iterations, 5);
    assert_eq!(stats.transitions, 3);
    assert_eq!(stats.end, SessionEnd::EndOfStream);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "mouth closed\nmouth open\nmouth closed\n"
    );
    assert_eq!(link.transport().history().len(), 6);
}

#[test]
fn smile_boundary_and_animation() {
    let lines = vec![
        smile_line(0, 0.4, 0.3),
        smile_line(1, 0.9, 0.7),
        smile_line(2, 0.9, 0.7),
        smile_line(3, 0.9, 0.7),
    ];
    let mut src  = replay(&lines);
    let mut link = Link::new(SimulatedBoard::new());
    let mut out  = Vec::new();

    let stats = run_until_cancelled(
        &mut src, &mut SmileBlink::default(), &mut link, &CancelToken::new(), &mut out,
    ).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "not smile\nsmile\n");
    assert_eq!(stats.transitions, 2);

    // Setup, idle frame, then on/off/on while smiling.
    let statled: Vec<_> = link.transport().history().iter()
        .filter(|l| l.starts_with("statled"))
        .cloned()
        .collect();
    assert_eq!(statled, ["statled(0,1,0)", "statled(0,1,0)", "statled(1,0,0)", "statled(1,0,0)"]);
}

#[test]
fn stale_timestamp_aborts_the_session() {
    let lines = vec![mouth_line(100, 10), mouth_line(100, 20)];
    let mut src  = replay(&lines);
    let mut link = Link::new(SimulatedBoard::new());

    let err = run_until_cancelled(
        &mut src, &mut MouthWatch::default(), &mut link, &CancelToken::new(), &mut Vec::new(),
    ).unwrap_err();

    assert!(matches!(
        err,
        GhizzyError::Perception(PerceptionError::NonMonotonicTimestamp { previous: 100, got: 100, .. })
    ));
}

/// Cancels the shared token after handing out `after` observations.
struct CancelAfter {
    after:  usize,
    served: usize,
    token:  CancelToken,
}

impl PerceptionSource for CancelAfter {
    fn next_observation(&mut self) -> Result<Option<Observation>, PerceptionError> {
        self.served += 1;
        if self.served == self.after {
            self.token.cancel();
        }
        Ok(Some(Observation::empty()))
    }
}

#[test]
fn cancellation_stops_an_endless_stream() {
    let token = CancelToken::new();
    let mut src = CancelAfter { after: 4, served: 0, token: token.clone() };
    let mut link = Link::new(SimulatedBoard::new());

    let stats = run_until_cancelled(
        &mut src, &mut FingerBlink::new(Default::default()), &mut link, &token, &mut Vec::new(),
    ).unwrap();

    assert_eq!(stats.iterations, 4);
    assert_eq!(stats.end, SessionEnd::Cancelled);
}

#[test]
fn board_selection_is_not_repeated_for_eye_commands() {
    // Eye LEDs live on the head itself; the behaviors never select a module.
    let lines: Vec<_> = (0..3).map(|i| mouth_line(i, 20 * (i as u32 % 2) + 5)).collect();
    let mut src  = replay(&lines);
    let mut link = Link::new(SimulatedBoard::new());
    run_until_cancelled(
        &mut src, &mut MouthWatch::default(), &mut link, &CancelToken::new(), &mut Vec::new(),
    ).unwrap();
    assert!(link.transport().history().iter().all(|l| !l.starts_with("sel(")));
    assert_eq!(link.current_address(), 0);
}
