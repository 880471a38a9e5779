//! Landmark data model: what the external vision model hands us each frame.
//!
//! Coordinates are normalised to the image: `x` grows to the right, `y`
//! grows downward, both in `0.0..=1.0` for points inside the frame.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// SignalError
// ════════════════════════════════════════════════════════════════════════════

/// Errors raised while extracting a signal from a landmark set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("landmark {index} requested but the set only has {len} points")]
    MissingLandmark { index: usize, len: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Landmark / LandmarkSet
// ════════════════════════════════════════════════════════════════════════════

/// One normalised landmark point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Relative depth; absent in 2-D models.
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y, z: 0.0 }
    }

    /// Planar (x, y) distance; depth is ignored.
    pub fn distance_2d(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Ordered landmark points for one detected hand or face.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Landmark>) -> Self {
        LandmarkSet { points }
    }

    /// Point at `index`, or [`SignalError::MissingLandmark`].
    pub fn get(&self, index: usize) -> Result<&Landmark, SignalError> {
        self.points.get(index).ok_or(SignalError::MissingLandmark {
            index,
            len: self.points.len(),
        })
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn points(&self) -> &[Landmark] { &self.points }

    /// Flip horizontally (`x → 1 − x`), as a selfie-view camera does.
    pub fn mirror(&mut self) {
        for p in &mut self.points {
            p.x = 1.0 - p.x;
        }
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(points: Vec<Landmark>) -> Self {
        LandmarkSet::new(points)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Detections
// ════════════════════════════════════════════════════════════════════════════

/// Handedness label reported by the hand model. Only the exact label
/// `"Right"` is a right hand; any other label reads as `Left`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Handedness {
    Left,
    Right,
}

impl From<String> for Handedness {
    fn from(label: String) -> Self {
        if label == "Right" { Handedness::Right } else { Handedness::Left }
    }
}

impl Handedness {
    pub fn name(self) -> &'static str {
        match self {
            Handedness::Left  => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// One detected hand: 21 landmarks plus the handedness label.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandDetection {
    pub handedness: Handedness,
    pub landmarks:  LandmarkSet,
}

/// A named classifier score ("blendshape") produced by the face model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blendshape {
    pub category_name: String,
    pub score:         f64,
}

/// One detected face: mesh landmarks and, when enabled, blendshape scores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceDetection {
    #[serde(default)]
    pub landmarks:   LandmarkSet,
    #[serde(default)]
    pub blendshapes: Vec<Blendshape>,
}

impl FaceDetection {
    /// Score of the named blendshape; `0.0` when the model did not report it.
    pub fn blendshape(&self, name: &str) -> f64 {
        self.blendshapes
            .iter()
            .find(|b| b.category_name == name)
            .map(|b| b.score)
            .unwrap_or(0.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Observation
// ════════════════════════════════════════════════════════════════════════════

/// Everything the vision model reported for one frame.
///
/// A frame where nothing was detected is still a valid observation with
/// both detections absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Capture time; required to increase strictly in video mode.
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
    #[serde(default)]
    pub hand: Option<HandDetection>,
    #[serde(default)]
    pub face: Option<FaceDetection>,
}

impl Observation {
    pub fn empty() -> Self { Observation::default() }

    pub fn with_hand(hand: HandDetection) -> Self {
        Observation { hand: Some(hand), ..Observation::default() }
    }

    pub fn with_face(face: FaceDetection) -> Self {
        Observation { face: Some(face), ..Observation::default() }
    }

    /// Parse one JSON line of an observation stream.
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Mirror every landmark horizontally.
    ///
    /// Handedness labels are left untouched: the hand model already labels
    /// hands as seen in the image it was given.
    pub fn mirror(&mut self) {
        if let Some(h) = self.hand.as_mut() {
            h.landmarks.mirror();
        }
        if let Some(f) = self.face.as_mut() {
            f.landmarks.mirror();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
