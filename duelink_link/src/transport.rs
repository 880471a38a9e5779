//! Transports: where command lines actually go.
//!
//! [`SimulatedBoard`] is always available and stands in for hardware in
//! simulation mode and in tests. The real USB backend lives in
//! [`crate::serial`] behind the `serial` feature.

use crate::command::Command;
use crate::error::LinkError;

// ════════════════════════════════════════════════════════════════════════════
// Transport trait
// ════════════════════════════════════════════════════════════════════════════

/// A request/response channel to the board.
///
/// `execute` sends one command line and blocks until the board is ready for
/// the next one, returning whatever it printed (empty for fire-and-forget
/// commands).
pub trait Transport: Send {
    fn execute(&mut self, line: &str) -> Result<String, LinkError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&mut self, line: &str) -> Result<String, LinkError> {
        (**self).execute(line)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimulatedBoard
// ════════════════════════════════════════════════════════════════════════════

/// An in-memory board that records every line it receives.
///
/// `distance()` is answered from a script of replies. A cycling script
/// repeats forever; a one-shot script reports [`LinkError::Disconnected`]
/// once exhausted, which ends any session driving it. With no script every
/// reading is `0` (nothing in range).
#[derive(Clone, Debug, Default)]
pub struct SimulatedBoard {
    history:  Vec<String>,
    selected: u8,
    replies:  Vec<String>,
    cursor:   usize,
    cycle:    bool,
}

impl SimulatedBoard {
    pub fn new() -> Self { Self::default() }

    /// One-shot script of distance readings.
    pub fn with_readings<I: IntoIterator<Item = i32>>(readings: I) -> Self {
        Self::with_replies(readings.into_iter().map(|r| r.to_string()))
    }

    /// One-shot script of raw `distance()` replies, for malformed-reply cases.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SimulatedBoard {
            replies: replies.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Repeat the script instead of disconnecting at its end.
    pub fn cycling(mut self) -> Self {
        self.cycle = true;
        self
    }

    /// Every line received so far, in order.
    pub fn history(&self) -> &[String] { &self.history }

    /// Drain the recorded lines.
    pub fn take_history(&mut self) -> Vec<String> { std::mem::take(&mut self.history) }

    /// Address most recently selected with `sel(n)`.
    pub fn selected(&self) -> u8 { self.selected }

    fn next_reading(&mut self) -> Result<String, LinkError> {
        if self.replies.is_empty() {
            return Ok("0".to_string());
        }
        if self.cursor >= self.replies.len() {
            if !self.cycle {
                return Err(LinkError::Disconnected);
            }
            self.cursor = 0;
        }
        let r = self.replies[self.cursor].clone();
        self.cursor += 1;
        Ok(r)
    }
}

impl Transport for SimulatedBoard {
    fn execute(&mut self, line: &str) -> Result<String, LinkError> {
        self.history.push(line.to_string());
        tracing::trace!(target: "duelink::sim", "{}", line);

        if let Some(addr) = line.strip_prefix("sel(").and_then(|s| s.strip_suffix(')')) {
            if let Ok(a) = addr.trim().parse() {
                self.selected = a;
            }
            return Ok(String::new());
        }

        if line == Command::Distance.to_string() {
            return self.next_reading();
        }

        Ok(String::new())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_and_tracks_selection() {
        let mut b = SimulatedBoard::new();
        b.execute("sel(3)").unwrap();
        b.execute("servost(1,40)").unwrap();
        assert_eq!(b.selected(), 3);
        assert_eq!(b.history(), ["sel(3)", "servost(1,40)"]);
        assert_eq!(b.take_history().len(), 2);
        assert!(b.history().is_empty());
    }

    #[test]
    fn unscripted_distance_reads_zero() {
        let mut b = SimulatedBoard::new();
        assert_eq!(b.execute("distance()").unwrap(), "0");
        assert_eq!(b.execute("distance()").unwrap(), "0");
    }

    #[test]
    fn one_shot_script_disconnects() {
        let mut b = SimulatedBoard::with_readings([30, 10]);
        assert_eq!(b.execute("distance()").unwrap(), "30");
        assert_eq!(b.execute("distance()").unwrap(), "10");
        assert!(matches!(b.execute("distance()"), Err(LinkError::Disconnected)));
    }

    #[test]
    fn cycling_script_repeats() {
        let mut b = SimulatedBoard::with_readings([5, 6]).cycling();
        let got: Vec<String> = (0..5).map(|_| b.execute("distance()").unwrap()).collect();
        assert_eq!(got, ["5", "6", "5", "6", "5"]);
    }

    #[test]
    fn boxed_transport_delegates() {
        let mut t: Box<dyn Transport> = Box::new(SimulatedBoard::with_readings([9]));
        assert_eq!(t.execute("distance()").unwrap(), "9");
    }
}
