//! Hand features: extended-finger count and fingertip pixel position.
//!
//! Indices follow the 21-point hand topology (wrist = 0, fingertips at
//! 4, 8, 12, 16, 20).

use crate::model::{HandDetection, Handedness, SignalError};

pub const WRIST:      usize = 0;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP:   usize = 14;
pub const RING_TIP:   usize = 16;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_TIP:  usize = 20;

/// (tip, proximal joint) pairs for the four non-thumb fingers.
const FINGER_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP,  INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP,   RING_PIP),
    (PINKY_TIP,  PINKY_PIP),
];

/// Count extended fingers, `0..=5`.
///
/// * Thumb: tip x beyond the IP joint x, to the right for a `Right` hand,
///   to the left for a `Left` hand.
/// * Other fingers: tip above (smaller y than) the PIP joint.
pub fn count_fingers(hand: &HandDetection) -> Result<u8, SignalError> {
    let lm = &hand.landmarks;
    let mut fingers = 0u8;

    let tip = lm.get(THUMB_TIP)?;
    let ip  = lm.get(THUMB_IP)?;
    let thumb_out = match hand.handedness {
        Handedness::Right => tip.x > ip.x,
        Handedness::Left  => tip.x < ip.x,
    };
    if thumb_out {
        fingers += 1;
    }

    for (tip, pip) in FINGER_PAIRS {
        if lm.get(tip)?.y < lm.get(pip)?.y {
            fingers += 1;
        }
    }

    Ok(fingers)
}

/// Horizontal pixel position of the index fingertip in a frame
/// `frame_width` pixels wide. Truncates toward zero.
pub fn index_tip_px(hand: &HandDetection, frame_width: u32) -> Result<i32, SignalError> {
    let tip = hand.landmarks.get(INDEX_TIP)?;
    Ok((tip.x * frame_width as f32) as i32)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
