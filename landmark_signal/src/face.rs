//! Face features: mouth openness from mesh landmarks and smile score from
//! blendshapes.

use std::fmt;

use crate::model::{FaceDetection, SignalError};

/// Inner upper lip, centre.
pub const UPPER_LIP:    usize = 13;
/// Inner lower lip, centre.
pub const LOWER_LIP:    usize = 14;
pub const MOUTH_LEFT:   usize = 61;
pub const MOUTH_RIGHT:  usize = 291;

pub const SMILE_LEFT:  &str = "mouthSmileLeft";
pub const SMILE_RIGHT: &str = "mouthSmileRight";

/// Default openness ratio above which the mouth counts as open.
pub const MOUTH_OPEN_RATIO: f32 = 0.25;
/// Default average smile score above which the face counts as smiling.
pub const SMILE_CUTOFF:     f64 = 0.35;

// ════════════════════════════════════════════════════════════════════════════
// Mouth
// ════════════════════════════════════════════════════════════════════════════

/// Lip gap divided by mouth width, so the value does not depend on how far
/// the face is from the camera. A zero width yields `0.0`.
pub fn mouth_open_ratio(face: &FaceDetection) -> Result<f32, SignalError> {
    let lm = &face.landmarks;
    let gap   = lm.get(UPPER_LIP)?.distance_2d(lm.get(LOWER_LIP)?);
    let width = lm.get(MOUTH_LEFT)?.distance_2d(lm.get(MOUTH_RIGHT)?);
    Ok(ratio_or_zero(gap, width))
}

fn ratio_or_zero(gap: f32, width: f32) -> f32 {
    if width > 0.0 { gap / width } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouthState {
    Closed,
    Open,
}

impl MouthState {
    /// Open iff `ratio > cutoff`.
    pub fn classify(ratio: f32, cutoff: f32) -> Self {
        if ratio > cutoff { MouthState::Open } else { MouthState::Closed }
    }
}

impl fmt::Display for MouthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MouthState::Open   => write!(f, "mouth open"),
            MouthState::Closed => write!(f, "mouth closed"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Smile
// ════════════════════════════════════════════════════════════════════════════

/// Mean of the left and right smile blendshapes.
pub fn smile_score(face: &FaceDetection) -> f64 {
    (face.blendshape(SMILE_LEFT) + face.blendshape(SMILE_RIGHT)) / 2.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SmileState {
    NotSmiling,
    Smiling,
}

impl SmileState {
    /// Smiling iff `score > cutoff`; the cutoff itself is not a smile.
    pub fn classify(score: f64, cutoff: f64) -> Self {
        if score > cutoff { SmileState::Smiling } else { SmileState::NotSmiling }
    }
}

impl fmt::Display for SmileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmileState::Smiling    => write!(f, "smile"),
            SmileState::NotSmiling => write!(f, "not smile"),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blendshape, Landmark, LandmarkSet};

    /// A 300-point mesh with only the four mouth points placed.
    fn mouth(gap: f32, width: f32) -> FaceDetection {
        let mut points = vec![Landmark::default(); 300];
        points[UPPER_LIP]   = Landmark::new(0.5, 0.5);
        points[LOWER_LIP]   = Landmark::new(0.5, 0.5 + gap);
        points[MOUTH_LEFT]  = Landmark::new(0.5 - width / 2.0, 0.55);
        points[MOUTH_RIGHT] = Landmark::new(0.5 + width / 2.0, 0.55);
        FaceDetection { landmarks: LandmarkSet::new(points), blendshapes: vec![] }
    }

    fn smiling(left: f64, right: f64) -> FaceDetection {
        FaceDetection {
            landmarks: LandmarkSet::default(),
            blendshapes: vec![
                Blendshape { category_name: "jawOpen".into(),  score: 0.9 },
                Blendshape { category_name: SMILE_LEFT.into(),  score: left },
                Blendshape { category_name: SMILE_RIGHT.into(), score: right },
            ],
        }
    }

    // ── Mouth ────────────────────────────────────────────────────────────
    #[test]
    fn ratio_divides_gap_by_width() {
        assert!((ratio_or_zero(10.0, 50.0) - 0.2).abs() < 1e-6);
        assert!((ratio_or_zero(20.0, 50.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn narrow_gap_is_closed() {
        let r = mouth_open_ratio(&mouth(0.02, 0.10)).unwrap();
        assert!((r - 0.2).abs() < 1e-4);
        assert_eq!(MouthState::classify(r, MOUTH_OPEN_RATIO), MouthState::Closed);
        assert_eq!(MouthState::Closed.to_string(), "mouth closed");
    }

    #[test]
    fn wide_gap_is_open() {
        let r = mouth_open_ratio(&mouth(0.04, 0.10)).unwrap();
        assert!((r - 0.4).abs() < 1e-4);
        assert_eq!(MouthState::classify(r, MOUTH_OPEN_RATIO), MouthState::Open);
        assert_eq!(MouthState::Open.to_string(), "mouth open");
    }

    #[test]
    fn zero_width_gives_zero_ratio() {
        let r = mouth_open_ratio(&mouth(0.05, 0.0)).unwrap();
        assert_eq!(r, 0.0);
        assert_eq!(MouthState::classify(r, MOUTH_OPEN_RATIO), MouthState::Closed);
    }

    #[test]
    fn sparse_mesh_is_rejected() {
        let face = FaceDetection {
            landmarks: LandmarkSet::new(vec![Landmark::default(); 20]),
            blendshapes: vec![],
        };
        assert!(mouth_open_ratio(&face).is_err());
    }

    // ── Smile ────────────────────────────────────────────────────────────
    #[test]
    fn smile_cutoff_is_exclusive() {
        let score = smile_score(&smiling(0.4, 0.3));
        assert_eq!(score, 0.35);
        assert_eq!(SmileState::classify(score, SMILE_CUTOFF), SmileState::NotSmiling);
        assert_eq!(SmileState::NotSmiling.to_string(), "not smile");
    }

    #[test]
    fn broad_smile() {
        let score = smile_score(&smiling(0.8, 0.6));
        assert_eq!(SmileState::classify(score, SMILE_CUTOFF), SmileState::Smiling);
        assert_eq!(SmileState::Smiling.to_string(), "smile");
    }

    #[test]
    fn one_sided_scores_average_with_zero() {
        let face = FaceDetection {
            landmarks: LandmarkSet::default(),
            blendshapes: vec![Blendshape { category_name: SMILE_LEFT.into(), score: 0.6 }],
        };
        assert!((smile_score(&face) - 0.3).abs() < 1e-6);
    }
}
