//! # landmark_signal
//!
//! Turns hand/face landmark detections into the small signals that drive
//! the Ghizzy actuators.
//!
//! ## Signals
//!
//! | Signal | Source | Extractor |
//! |---|---|---|
//! | Finger count `0..=5` | hand landmarks + handedness | [`count_fingers`] |
//! | Index-tip x (px) | hand landmark 8 | [`index_tip_px`] |
//! | Mouth openness ratio | face landmarks 13/14/61/291 | [`mouth_open_ratio`] |
//! | Smile score | `mouthSmileLeft` / `mouthSmileRight` blendshapes | [`smile_score`] |
//!
//! [`Debouncer`] suppresses repeats of an unchanged value and
//! [`MotionTracker`] flags horizontal jumps between frames.
//!
//! ## Quick start
//!
//! ```rust
//! use landmark_signal::{Observation, count_fingers};
//!
//! let line = r#"{"hand":{"handedness":"Right","landmarks":[]}}"#;
//! let obs = Observation::from_json(line).unwrap();
//! // A hand with no points cannot be counted.
//! assert!(count_fingers(obs.hand.as_ref().unwrap()).is_err());
//! ```

pub mod model;
pub mod hand;
pub mod face;
pub mod debounce;
pub mod motion;

pub use model::{
    Blendshape, FaceDetection, HandDetection, Handedness, Landmark, LandmarkSet,
    Observation, SignalError,
};
pub use hand::{count_fingers, index_tip_px};
pub use face::{mouth_open_ratio, smile_score, MouthState, SmileState};
pub use debounce::Debouncer;
pub use motion::MotionTracker;
