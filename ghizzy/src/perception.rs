//! Perception sources: where observations come from.
//!
//! The landmark model runs outside this crate. Its results arrive as a
//! stream of JSON observations, one per line (see
//! [`landmark_signal::Observation`]), either replayed from a recording or
//! piped live from a landmarker process. Consumers don't need to know which.
//!
//! End of the stream is the equivalent of the camera failing to deliver a
//! frame: the session ends.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use landmark_signal::Observation;
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// PerceptionError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Error, Debug)]
pub enum PerceptionError {
    #[error("observation stream read failed: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: invalid observation: {source}")]
    Decode {
        line:   usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: timestamp {got} ms does not advance past {previous} ms")]
    NonMonotonicTimestamp { line: usize, previous: u64, got: u64 },
}

// ════════════════════════════════════════════════════════════════════════════
// PerceptionSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver one [`Observation`] per loop iteration.
pub trait PerceptionSource {
    /// The next observation, or `None` once the capture has ended.
    fn next_observation(&mut self) -> Result<Option<Observation>, PerceptionError>;
}

/// How the landmark model was run when the stream was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunningMode {
    /// Independent still images; timestamps are ignored.
    Image,
    /// Video: timestamps, where present, must strictly increase.
    Video,
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource: JSON lines from a file or a pipe
// ════════════════════════════════════════════════════════════════════════════

/// Reads JSON-line observations from any buffered reader.
pub struct ReplaySource<R> {
    reader:  R,
    mode:    RunningMode,
    mirror:  bool,
    line:    usize,
    last_ts: Option<u64>,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R, mode: RunningMode) -> Self {
        ReplaySource { reader, mode, mirror: false, line: 0, last_ts: None }
    }

    /// Flip every observation horizontally before handing it out, the way
    /// a selfie-view preview flips the camera image.
    pub fn mirrored(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    fn check_timestamp(&mut self, obs: &Observation) -> Result<(), PerceptionError> {
        if self.mode != RunningMode::Video {
            return Ok(());
        }
        if let Some(got) = obs.timestamp_ms {
            if let Some(previous) = self.last_ts {
                if got <= previous {
                    return Err(PerceptionError::NonMonotonicTimestamp {
                        line: self.line, previous, got,
                    });
                }
            }
            self.last_ts = Some(got);
        }
        Ok(())
    }
}

impl ReplaySource<BufReader<File>> {
    /// Open a recorded stream from disk.
    pub fn open<P: AsRef<Path>>(path: P, mode: RunningMode) -> io::Result<Self> {
        Ok(ReplaySource::new(BufReader::new(File::open(path)?), mode))
    }
}

impl<R: BufRead> PerceptionSource for ReplaySource<R> {
    fn next_observation(&mut self) -> Result<Option<Observation>, PerceptionError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if !buf.trim().is_empty() {
                break;
            }
        }

        let mut obs = Observation::from_json(buf.trim())
            .map_err(|source| PerceptionError::Decode { line: self.line, source })?;
        self.check_timestamp(&obs)?;
        if self.mirror {
            obs.mirror();
        }
        Ok(Some(obs))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedSource: fixed observations
// ════════════════════════════════════════════════════════════════════════════

/// Hands out a fixed list of observations, then ends.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Observation>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Observation>>(frames: I) -> Self {
        ScriptedSource { frames: frames.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize { self.frames.len() }
}

impl PerceptionSource for ScriptedSource {
    fn next_observation(&mut self) -> Result<Option<Observation>, PerceptionError> {
        Ok(self.frames.pop_front())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
