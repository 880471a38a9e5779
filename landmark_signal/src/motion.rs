//! Frame-to-frame horizontal motion of a tracked point.

/// Default motion threshold in pixels.
pub const MOVE_THRESHOLD_PX: i32 = 8;

/// Tracks one pixel coordinate across frames and flags jumps larger than a
/// threshold.
#[derive(Clone, Debug)]
pub struct MotionTracker {
    threshold: i32,
    prev:      Option<i32>,
}

impl MotionTracker {
    pub fn new(threshold: i32) -> Self {
        MotionTracker { threshold, prev: None }
    }

    /// Feed the current position. Returns the delta when its magnitude
    /// exceeds the threshold; the first position only primes the tracker.
    pub fn update(&mut self, x: i32) -> Option<i32> {
        let moved = self.prev
            .map(|p| x.saturating_sub(p))
            .filter(|dx| i64::from(dx.unsigned_abs()) > i64::from(self.threshold));
        self.prev = Some(x);
        moved
    }

    pub fn previous(&self) -> Option<i32> { self.prev }
    pub fn threshold(&self) -> i32 { self.threshold }
}

impl Default for MotionTracker {
    fn default() -> Self { MotionTracker::new(MOVE_THRESHOLD_PX) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_jump_after_still_frames() {
        let mut t = MotionTracker::new(8);
        let events: Vec<Option<i32>> = [100, 100, 100, 112].iter().map(|x| t.update(*x)).collect();
        assert_eq!(events, vec![None, None, None, Some(12)]);
    }

    #[test]
    fn threshold_is_exclusive_both_ways() {
        let mut t = MotionTracker::new(8);
        t.update(50);
        assert_eq!(t.update(58), None);
        assert_eq!(t.update(50), None);
        assert_eq!(t.update(41), Some(-9));
    }

    #[test]
    fn tracks_previous_even_without_motion() {
        let mut t = MotionTracker::default();
        assert_eq!(t.previous(), None);
        t.update(10);
        t.update(12);
        assert_eq!(t.previous(), Some(12));
        assert_eq!(t.threshold(), MOVE_THRESHOLD_PX);
    }

    #[test]
    fn extreme_jumps_saturate() {
        let mut t = MotionTracker::default();
        t.update(-64);
        assert_eq!(t.update(i32::MAX), Some(i32::MAX));
        assert_eq!(t.update(i32::MIN), Some(i32::MIN));
    }
}
