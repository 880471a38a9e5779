//! Fan-follow: a distance sensor on a sweeping servo looks for something
//! close, then a second servo turns the fan toward it.
//!
//! ```text
//!            reading in (0, threshold)
//!   Sweeping ─────────────────────────▶ Tracking
//!      ▲     orient fan servo, fan on       │
//!      │                                    │ reading ≥ threshold or ≤ 0
//!      └────────────────────────────────────┘
//!                   fan off
//! ```
//!
//! The sweep position survives a tracking episode, so the scan resumes
//! where it stopped.

use std::time::Duration;

use duelink_link::{Link, Transport};

use crate::error::GhizzyError;

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// Sleep before each step, per phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub sweep: Duration,
    pub track: Duration,
}

impl Pacing {
    /// No sleeping at all; for tests and replays.
    pub const ZERO: Pacing = Pacing { sweep: Duration::ZERO, track: Duration::ZERO };
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            sweep: Duration::from_millis(100),
            track: Duration::from_millis(80),
        }
    }
}

/// Module addresses and tuning for the fan-follow rig.
#[derive(Clone, Debug, PartialEq)]
pub struct FanFollowConfig {
    pub scan_servo:   u8,
    pub sensor:       u8,
    pub fan_servo:    u8,
    pub fan:          u8,
    pub min_angle:    i32,
    pub max_angle:    i32,
    pub step:         i32,
    /// Readings strictly below this (and above zero) count as in range.
    pub threshold_cm: i32,
    pub fan_speed:    u8,
    pub pacing:       Pacing,
}

impl Default for FanFollowConfig {
    fn default() -> Self {
        FanFollowConfig {
            scan_servo:   1,
            sensor:       2,
            fan_servo:    3,
            fan:          4,
            min_angle:    20,
            max_angle:    160,
            step:         5,
            threshold_cm: 15,
            fan_speed:    60,
            pacing:       Pacing::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FanFollow
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Sweeping,
    Tracking,
}

pub struct FanFollow {
    cfg:       FanFollowConfig,
    angle:     i32,
    direction: i32,
    phase:     Phase,
}

impl FanFollow {
    pub fn new(cfg: FanFollowConfig) -> Self {
        let angle = cfg.min_angle;
        FanFollow { cfg, angle, direction: 1, phase: Phase::Sweeping }
    }

    pub fn phase(&self) -> Phase { self.phase }
    /// Next angle the scan servo will be driven to.
    pub fn angle(&self) -> i32 { self.angle }

    /// How long to wait before the next [`step`](Self::step).
    pub fn pause_interval(&self) -> Duration {
        match self.phase {
            Phase::Sweeping => self.cfg.pacing.sweep,
            Phase::Tracking => self.cfg.pacing.track,
        }
    }

    /// Park both servos at the start of the arc with the fan off.
    pub fn setup<T: Transport>(&mut self, link: &mut Link<T>) -> Result<(), GhizzyError> {
        let c = &self.cfg;
        link.set_servo(c.scan_servo, c.min_angle)?;
        link.set_servo(c.fan_servo, c.min_angle)?;
        link.set_fan(c.fan, 0)?;
        tracing::info!(
            sensor = c.sensor,
            threshold_cm = c.threshold_cm,
            "fan-follow ready"
        );
        Ok(())
    }

    /// One sensor read and its consequences. Returns a line when the fan
    /// switches on or off.
    pub fn step<T: Transport>(&mut self, link: &mut Link<T>) -> Result<Option<String>, GhizzyError> {
        let distance = link.read_distance(self.cfg.sensor)?;
        match self.phase {
            Phase::Sweeping => self.sweep(link, distance),
            Phase::Tracking => self.track(link, distance),
        }
    }

    fn in_range(&self, distance: i32) -> bool {
        distance > 0 && distance < self.cfg.threshold_cm
    }

    fn sweep<T: Transport>(
        &mut self,
        link:     &mut Link<T>,
        distance: i32,
    ) -> Result<Option<String>, GhizzyError> {
        link.set_servo(self.cfg.scan_servo, self.angle)?;
        self.advance();

        if !self.in_range(distance) {
            tracing::trace!(distance, angle = self.angle, "scan");
            return Ok(None);
        }

        // The fan points at the already-advanced angle.
        link.set_servo(self.cfg.fan_servo, self.angle)?;
        link.set_fan(self.cfg.fan, self.cfg.fan_speed)?;
        self.phase = Phase::Tracking;
        tracing::info!(distance, angle = self.angle, "object in range, fan on");
        Ok(Some(format!("fan on at {}° ({} cm)", self.angle, distance)))
    }

    fn track<T: Transport>(
        &mut self,
        link:     &mut Link<T>,
        distance: i32,
    ) -> Result<Option<String>, GhizzyError> {
        if self.in_range(distance) {
            return Ok(None);
        }
        link.set_fan(self.cfg.fan, 0)?;
        self.phase = Phase::Sweeping;
        tracing::info!(distance, "object gone, fan off");
        Ok(Some(format!("fan off ({} cm)", distance)))
    }

    /// Move one step along the arc, bouncing off both ends.
    fn advance(&mut self) {
        let c = &self.cfg;
        self.angle += self.direction * c.step;
        if self.angle >= c.max_angle {
            self.angle = c.max_angle;
            self.direction = -1;
        } else if self.angle <= c.min_angle {
            self.angle = c.min_angle;
            self.direction = 1;
        }
    }
}

impl Default for FanFollow {
    fn default() -> Self { FanFollow::new(FanFollowConfig::default()) }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use duelink_link::{LinkError, SimulatedBoard};

    fn rig(readings: &[i32]) -> (FanFollow, Link<SimulatedBoard>) {
        let cfg = FanFollowConfig { pacing: Pacing::ZERO, ..Default::default() };
        (FanFollow::new(cfg), Link::new(SimulatedBoard::with_readings(readings.to_vec())))
    }

    #[test]
    fn setup_parks_servos_and_stops_fan() {
        let (mut f, mut link) = rig(&[]);
        f.setup(&mut link).unwrap();
        assert_eq!(
            link.transport().history(),
            ["sel(1)", "servost(1,20)", "sel(3)", "servost(1,20)", "sel(4)", "fan(0)"]
        );
    }

    #[test]
    fn fan_on_at_third_reading_off_at_fifth() {
        let (mut f, mut link) = rig(&[30, 30, 10, 10, 20]);
        let logs: Vec<_> = (0..5).map(|_| f.step(&mut link).unwrap()).collect();

        assert!(logs[0].is_none() && logs[1].is_none());
        assert_eq!(logs[2].as_deref(), Some("fan on at 35° (10 cm)"));
        assert!(logs[3].is_none());
        assert_eq!(logs[4].as_deref(), Some("fan off (20 cm)"));
        assert_eq!(f.phase(), Phase::Sweeping);

        let fan: Vec<_> = link.transport().history().iter()
            .filter(|l| l.starts_with("fan("))
            .cloned()
            .collect();
        assert_eq!(fan, ["fan(60)", "fan(0)"]);
    }

    #[test]
    fn zero_reading_never_starts_tracking() {
        let (mut f, mut link) = rig(&[0, 0, 0]);
        for _ in 0..3 {
            assert!(f.step(&mut link).unwrap().is_none());
        }
        assert_eq!(f.phase(), Phase::Sweeping);
        assert!(!link.transport().history().iter().any(|l| l == "fan(60)"));
    }

    #[test]
    fn zero_reading_while_tracking_stops_the_fan() {
        let (mut f, mut link) = rig(&[5, 0]);
        f.step(&mut link).unwrap();
        assert_eq!(f.phase(), Phase::Tracking);
        assert_eq!(f.step(&mut link).unwrap().as_deref(), Some("fan off (0 cm)"));
    }

    #[test]
    fn tracking_does_not_move_the_scan_servo() {
        let (mut f, mut link) = rig(&[5, 5, 5]);
        f.step(&mut link).unwrap();
        link.transport_mut().take_history();
        f.step(&mut link).unwrap();
        f.step(&mut link).unwrap();
        // Only sensor reads, sensor already selected.
        assert_eq!(link.transport().history(), ["sel(2)", "distance()", "distance()"]);
        assert_eq!(f.pause_interval(), Duration::ZERO);
    }

    #[test]
    fn sweep_bounces_between_bounds() {
        let readings = vec![40; 60];
        let (mut f, mut link) = rig(&readings);
        let mut seen = Vec::new();
        for _ in 0..60 {
            f.step(&mut link).unwrap();
            seen.push(f.angle());
        }
        assert_eq!(*seen.iter().max().unwrap(), 160);
        assert_eq!(*seen.iter().min().unwrap(), 20);
        // 28 steps up from 20 reach 160, then the scan heads back down.
        assert_eq!(seen[27], 160);
        assert_eq!(seen[28], 155);
        assert_eq!(seen[55], 20);
        assert_eq!(seen[56], 25);
    }

    #[test]
    fn sweep_resumes_where_it_left_off() {
        let (mut f, mut link) = rig(&[30, 10, 30, 30]);
        f.step(&mut link).unwrap();
        f.step(&mut link).unwrap();
        let held = f.angle();
        f.step(&mut link).unwrap();
        assert_eq!(f.angle(), held);
        f.step(&mut link).unwrap();
        assert_eq!(f.angle(), held + 5);
    }

    #[test]
    fn malformed_reply_fails_fast() {
        let cfg = FanFollowConfig { pacing: Pacing::ZERO, ..Default::default() };
        let mut f = FanFollow::new(cfg);
        let mut link = Link::new(SimulatedBoard::with_replies(["oops"]));
        match f.step(&mut link) {
            Err(GhizzyError::Link(LinkError::MalformedReply { .. })) => {}
            other => panic!("expected malformed reply, got {:?}", other),
        }
    }
}
