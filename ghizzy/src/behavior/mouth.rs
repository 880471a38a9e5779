//! Mouth open/close: Ghizzy's eyes mirror the user's mouth.

use duelink_link::{Link, Rgb, Transport};
use landmark_signal::{mouth_open_ratio, Debouncer, MouthState, Observation};
use landmark_signal::face::MOUTH_OPEN_RATIO;

use super::{both_eyes, Behavior};
use crate::error::GhizzyError;

pub struct MouthWatch {
    state:  Debouncer<MouthState>,
    cutoff: f32,
}

impl MouthWatch {
    pub fn new(cutoff: f32) -> Self {
        MouthWatch { state: Debouncer::new(), cutoff }
    }

    pub fn state(&self) -> Option<MouthState> { self.state.last().copied() }
}

impl Default for MouthWatch {
    fn default() -> Self { MouthWatch::new(MOUTH_OPEN_RATIO) }
}

impl Behavior for MouthWatch {
    fn name(&self) -> &'static str { "mouth" }

    fn setup<T: Transport>(&mut self, _link: &mut Link<T>) -> Result<(), GhizzyError> {
        Ok(())
    }

    fn step<T: Transport>(
        &mut self,
        obs:  &Observation,
        link: &mut Link<T>,
    ) -> Result<Option<String>, GhizzyError> {
        // A lost face keeps the last state.
        let Some(face) = &obs.face else { return Ok(None) };

        let ratio = mouth_open_ratio(face)?;
        let state = MouthState::classify(ratio, self.cutoff);
        if !self.state.update(state) {
            return Ok(None);
        }

        tracing::info!(ratio, "{}", state);
        let colour = match state {
            MouthState::Open   => Rgb::WHITE,
            MouthState::Closed => Rgb::OFF,
        };
        both_eyes(link, colour)?;
        Ok(Some(state.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use duelink_link::SimulatedBoard;
    use landmark_signal::{FaceDetection, Landmark, LandmarkSet};
    use landmark_signal::face::{LOWER_LIP, MOUTH_LEFT, MOUTH_RIGHT, UPPER_LIP};

    /// Mouth 0.10 wide with the given lip gap.
    fn face(gap: f32) -> Observation {
        let mut p = vec![Landmark::default(); 478];
        p[UPPER_LIP]   = Landmark::new(0.5, 0.50);
        p[LOWER_LIP]   = Landmark::new(0.5, 0.50 + gap);
        p[MOUTH_LEFT]  = Landmark::new(0.45, 0.52);
        p[MOUTH_RIGHT] = Landmark::new(0.55, 0.52);
        Observation::with_face(FaceDetection { landmarks: LandmarkSet::new(p), blendshapes: vec![] })
    }

    fn run(gaps: &[Option<f32>]) -> (Vec<String>, Vec<String>) {
        let mut b = MouthWatch::default();
        let mut link = Link::new(SimulatedBoard::new());
        let logs = gaps.iter()
            .filter_map(|g| {
                let obs = g.map(face).unwrap_or_default();
                b.step(&obs, &mut link).unwrap()
            })
            .collect();
        (logs, link.into_transport().take_history())
    }

    #[test]
    fn transitions_only() {
        let (logs, sent) = run(&[Some(0.02), Some(0.02), Some(0.04), Some(0.04), Some(0.01)]);
        assert_eq!(logs, ["mouth closed", "mouth open", "mouth closed"]);
        assert_eq!(
            sent,
            [
                "REye(0,0,0)", "LEye(0,0,0)",
                "REye(255,255,255)", "LEye(255,255,255)",
                "REye(0,0,0)", "LEye(0,0,0)",
            ]
        );
    }

    #[test]
    fn missing_face_keeps_state() {
        let (logs, _) = run(&[Some(0.04), None, None, Some(0.04)]);
        assert_eq!(logs, ["mouth open"]);
    }

    #[test]
    fn flicker_near_the_cutoff_is_reported() {
        // 0.024 and 0.026 straddle the 0.25 ratio; no hysteresis.
        let (logs, _) = run(&[Some(0.024), Some(0.026), Some(0.024), Some(0.026)]);
        assert_eq!(logs.len(), 4);
    }
}
