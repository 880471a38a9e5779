//! Perception-driven behaviors, one per demo.
//!
//! | Behavior | Signal | Emits |
//! |---|---|---|
//! | [`FingerBlink`] | finger count (debounced) | `count` blink pairs on both eyes |
//! | [`MotionBlink`] | index-tip x delta > threshold | one eye on, the other off, by counter parity |
//! | [`MouthWatch`] | open ratio > cutoff (debounced) | both eyes on / off |
//! | [`SmileBlink`] | mean smile score > cutoff (debounced) | eyes + status LED animation while smiling |
//!
//! Each behavior owns its loop state; nothing is global.

use std::thread;
use std::time::Duration;

use duelink_link::{Command, Link, Rgb, Transport};
use landmark_signal::Observation;

use crate::error::GhizzyError;

pub mod finger_count;
pub mod hand_motion;
pub mod mouth;
pub mod smile;

pub use finger_count::FingerBlink;
pub use hand_motion::MotionBlink;
pub use mouth::MouthWatch;
pub use smile::SmileBlink;

/// One perception → actuation mapping, stepped once per observation.
pub trait Behavior {
    fn name(&self) -> &'static str;

    /// Commands sent once before the first observation.
    fn setup<T: Transport>(&mut self, link: &mut Link<T>) -> Result<(), GhizzyError>;

    /// React to one observation. Returns a human-readable line when the
    /// classified state changed.
    fn step<T: Transport>(
        &mut self,
        obs:  &Observation,
        link: &mut Link<T>,
    ) -> Result<Option<String>, GhizzyError>;
}

/// Set both eyes, right first.
pub(crate) fn both_eyes<T: Transport>(link: &mut Link<T>, colour: Rgb) -> Result<(), GhizzyError> {
    link.send(Command::RightEye(colour))?;
    link.send(Command::LeftEye(colour))?;
    Ok(())
}

/// Sleep unless `d` is zero (tests run with zero pacing).
pub(crate) fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
