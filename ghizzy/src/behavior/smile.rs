//! Smile detector: while the user smiles, Ghizzy's eyes and status LED
//! animate every iteration.
//!
//! The transition log is debounced; the animation is not. It runs off the
//! current state and an iteration counter, so it keeps emitting for as long
//! as the smile lasts.

use duelink_link::{Command, Link, Rgb, Transport};
use landmark_signal::{smile_score, Debouncer, Observation, SmileState};
use landmark_signal::face::SMILE_CUTOFF;

use super::Behavior;
use crate::error::GhizzyError;

const LED_IDLE:   Command = Command::StatusLed { high: 0, low: 1, count: 0 };
const LED_SMILE:  Command = Command::StatusLed { high: 1, low: 0, count: 0 };

pub struct SmileBlink {
    state:   Debouncer<SmileState>,
    cutoff:  f64,
    counter: u64,
}

impl SmileBlink {
    pub fn new(cutoff: f64) -> Self {
        SmileBlink { state: Debouncer::new(), cutoff, counter: 0 }
    }

    pub fn state(&self) -> SmileState {
        self.state.last().copied().unwrap_or(SmileState::NotSmiling)
    }

    fn eyes<T: Transport>(link: &mut Link<T>, colour: Rgb) -> Result<(), GhizzyError> {
        link.send(Command::LeftEye(colour))?;
        link.send(Command::RightEye(colour))?;
        Ok(())
    }
}

impl Default for SmileBlink {
    fn default() -> Self { SmileBlink::new(SMILE_CUTOFF) }
}

impl Behavior for SmileBlink {
    fn name(&self) -> &'static str { "smile" }

    fn setup<T: Transport>(&mut self, link: &mut Link<T>) -> Result<(), GhizzyError> {
        Self::eyes(link, Rgb::OFF)?;
        link.send(LED_IDLE)?;
        Ok(())
    }

    fn step<T: Transport>(
        &mut self,
        obs:  &Observation,
        link: &mut Link<T>,
    ) -> Result<Option<String>, GhizzyError> {
        let mut log = None;
        // A face without blendshape scores is a miss, not a zero score.
        if let Some(face) = obs.face.as_ref().filter(|f| !f.blendshapes.is_empty()) {
            let score = smile_score(face);
            let state = SmileState::classify(score, self.cutoff);
            if self.state.update(state) {
                tracing::info!(score, "{}", state);
                log = Some(state.to_string());
            }
        }

        self.counter += 1;
        match self.state() {
            SmileState::Smiling if self.counter % 2 == 0 => {
                Self::eyes(link, Rgb::WHITE)?;
                link.send(LED_SMILE)?;
            }
            SmileState::Smiling => Self::eyes(link, Rgb::OFF)?,
            SmileState::NotSmiling => {
                Self::eyes(link, Rgb::OFF)?;
                link.send(LED_IDLE)?;
            }
        }
        Ok(log)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
