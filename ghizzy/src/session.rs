//! Run-until-cancelled control loops.
//!
//! Each iteration: check the cancel token, pull one observation, let the
//! behavior react, and print its transition line (if any). The loop ends on
//! cancellation, on end of the observation stream, or on the first error.

use std::io::Write;

use duelink_link::{Link, Transport};

use crate::behavior::{pause, Behavior};
use crate::cancel::CancelToken;
use crate::error::GhizzyError;
use crate::fan_follow::FanFollow;
use crate::perception::PerceptionSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Cancelled,
    EndOfStream,
}

/// What a finished session did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStats {
    pub iterations:  u64,
    pub transitions: u64,
    pub end:         SessionEnd,
}

/// Drive `behavior` from `source` until cancelled or the stream ends.
/// Transition lines go to `out`, one per line.
pub fn run_until_cancelled<S, B, T, W>(
    source:   &mut S,
    behavior: &mut B,
    link:     &mut Link<T>,
    cancel:   &CancelToken,
    out:      &mut W,
) -> Result<SessionStats, GhizzyError>
where
    S: PerceptionSource + ?Sized,
    B: Behavior,
    T: Transport,
    W: Write,
{
    behavior.setup(link)?;
    tracing::info!(behavior = behavior.name(), "session started");

    let mut iterations  = 0;
    let mut transitions = 0;
    let end = loop {
        if cancel.is_cancelled() {
            break SessionEnd::Cancelled;
        }
        let Some(obs) = source.next_observation()? else {
            break SessionEnd::EndOfStream;
        };
        iterations += 1;

        if let Some(line) = behavior.step(&obs, link)? {
            transitions += 1;
            writeln!(out, "{}", line)?;
        }
    };

    out.flush()?;
    tracing::info!(behavior = behavior.name(), iterations, transitions, ?end, "session ended");
    Ok(SessionStats { iterations, transitions, end })
}

/// Fan-follow has no perception source; it polls the distance sensor until
/// cancelled. A board that stops answering ends the run with an error.
pub fn run_fan_follow<T, W>(
    fan:    &mut FanFollow,
    link:   &mut Link<T>,
    cancel: &CancelToken,
    out:    &mut W,
) -> Result<SessionStats, GhizzyError>
where
    T: Transport,
    W: Write,
{
    fan.setup(link)?;
    tracing::info!(behavior = "fan-follow", "session started");

    let mut iterations  = 0;
    let mut transitions = 0;
    while !cancel.is_cancelled() {
        pause(fan.pause_interval());
        iterations += 1;
        if let Some(line) = fan.step(link)? {
            transitions += 1;
            writeln!(out, "{}", line)?;
        }
    }

    out.flush()?;
    tracing::info!(behavior = "fan-follow", iterations, transitions, "session ended");
    Ok(SessionStats { iterations, transitions, end: SessionEnd::Cancelled })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
