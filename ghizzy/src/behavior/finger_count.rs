//! Finger-count blink: show N fingers, Ghizzy blinks N times.

use std::time::Duration;

use duelink_link::{Link, Rgb, Transport};
use landmark_signal::{count_fingers, Debouncer, Observation};

use super::{both_eyes, pause, Behavior};
use crate::error::GhizzyError;

/// Gap between the off and on halves of a blink.
pub const BLINK_GAP: Duration = Duration::from_millis(50);

pub struct FingerBlink {
    last:      Debouncer<u8>,
    blink_gap: Duration,
}

impl FingerBlink {
    pub fn new(blink_gap: Duration) -> Self {
        FingerBlink { last: Debouncer::new(), blink_gap }
    }

    /// Last count acted upon; `None` after the hand was lost.
    pub fn last_count(&self) -> Option<u8> {
        self.last.last().copied()
    }

    fn blink<T: Transport>(&self, link: &mut Link<T>, count: u8) -> Result<(), GhizzyError> {
        if count == 0 {
            both_eyes(link, Rgb::OFF)?;
        }
        for i in 0..count * 2 {
            let colour = if i % 2 == 1 { Rgb::WHITE } else { Rgb::OFF };
            both_eyes(link, colour)?;
            pause(self.blink_gap);
        }
        Ok(())
    }
}

impl Default for FingerBlink {
    fn default() -> Self { FingerBlink::new(BLINK_GAP) }
}

impl Behavior for FingerBlink {
    fn name(&self) -> &'static str { "finger-count" }

    fn setup<T: Transport>(&mut self, link: &mut Link<T>) -> Result<(), GhizzyError> {
        both_eyes(link, Rgb::WHITE)
    }

    fn step<T: Transport>(
        &mut self,
        obs:  &Observation,
        link: &mut Link<T>,
    ) -> Result<Option<String>, GhizzyError> {
        let Some(hand) = &obs.hand else {
            self.last.reset();
            return Ok(None);
        };

        let count = count_fingers(hand)?;
        if !self.last.update(count) {
            return Ok(None);
        }
        tracing::info!(count, handedness = hand.handedness.name(), "finger count changed");
        self.blink(link, count)?;
        Ok(Some(count.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
