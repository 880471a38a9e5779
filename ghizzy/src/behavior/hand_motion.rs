//! Hand-motion blink: wave the index finger and the eyes flicker.
//!
//! Which eye lights is decided by the parity of an iteration counter, not
//! by the direction of the motion.

use duelink_link::{Command, Link, Rgb, Transport};
use landmark_signal::{index_tip_px, MotionTracker, Observation};
use landmark_signal::motion::MOVE_THRESHOLD_PX;

use super::{both_eyes, Behavior};
use crate::error::GhizzyError;

/// Capture width the normalised x is scaled to.
pub const FRAME_WIDTH: u32 = 640;

pub struct MotionBlink {
    tracker:     MotionTracker,
    frame_width: u32,
    counter:     u64,
}

impl MotionBlink {
    pub fn new(threshold_px: i32, frame_width: u32) -> Self {
        MotionBlink {
            tracker: MotionTracker::new(threshold_px),
            frame_width,
            counter: 0,
        }
    }

    pub fn iterations(&self) -> u64 { self.counter }
}

impl Default for MotionBlink {
    fn default() -> Self { MotionBlink::new(MOVE_THRESHOLD_PX, FRAME_WIDTH) }
}

impl Behavior for MotionBlink {
    fn name(&self) -> &'static str { "hand-motion" }

    fn setup<T: Transport>(&mut self, link: &mut Link<T>) -> Result<(), GhizzyError> {
        both_eyes(link, Rgb::OFF)
    }

    fn step<T: Transport>(
        &mut self,
        obs:  &Observation,
        link: &mut Link<T>,
    ) -> Result<Option<String>, GhizzyError> {
        self.counter += 1;

        let Some(hand) = &obs.hand else {
            both_eyes(link, Rgb::OFF)?;
            return Ok(None);
        };

        let x = index_tip_px(hand, self.frame_width)?;
        if let Some(dx) = self.tracker.update(x) {
            tracing::debug!(x, dx, counter = self.counter, "hand moved");
            if self.counter % 2 == 0 {
                link.send(Command::RightEye(Rgb::OFF))?;
                link.send(Command::LeftEye(Rgb::WHITE))?;
            } else {
                link.send(Command::LeftEye(Rgb::OFF))?;
                link.send(Command::RightEye(Rgb::WHITE))?;
            }
        }
        Ok(None)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
