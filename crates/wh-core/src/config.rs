//! Fleet configuration supplied by the visualization layer at startup.

use crate::{DEFAULT_FACTOR_BOUNDS, SimClock, WhError, WhResult};

/// Top-level fleet configuration.
///
/// Typically loaded from a JSON file by the application crate (enable the
/// `serde` feature) and passed to `SimBuilder`.  All distances are metres,
/// speeds m/s, accelerations m/s², durations nominal seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    /// Initial speed factor; clamped to the bounds below.
    pub speed_factor: f64,
    pub min_speed_factor: f64,
    pub max_speed_factor: f64,

    /// Top speed on open floor.
    pub cruise_speed: f32,
    /// Maximum speed gain per simulated second.
    pub accel_max: f32,
    /// Maximum speed loss per simulated second.
    pub decel_max: f32,
    /// Maximum heading change per simulated second, degrees.
    pub turn_rate_max_deg: f32,

    /// Lidar range: obstacles inside it contribute repulsion.
    pub detection_radius: f32,
    /// Obstacles ahead and closer than this slow the vehicle down.
    pub braking_distance: f32,
    /// Half-angle of the cone counted as "ahead" for braking, degrees.
    pub braking_cone_deg: f32,
    /// Combined steering vectors shorter than this count as a stalemate.
    pub stalemate_epsilon: f32,
    /// Weight of the lateral bias injected on stalemate.
    pub lateral_bias: f32,
    /// A vehicle this close to its target station has arrived.
    pub arrival_epsilon: f32,

    /// Simulated seconds a pickup station must stay empty before respawning.
    pub dwell_threshold_secs: f64,
    /// Nominal hold time for a package at a drop-off station.
    pub unload_wait_secs: f64,
    /// Nominal delay between work-selection retries.
    pub retry_backoff_secs: f64,
    /// A vehicle without a delivery for this many simulated seconds is
    /// reported as starving.
    pub starvation_warn_secs: f64,

    /// Seed for layout generation.  The same seed always produces the same
    /// scattered layout.
    pub seed: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            speed_factor:         1.0,
            min_speed_factor:     DEFAULT_FACTOR_BOUNDS.0,
            max_speed_factor:     DEFAULT_FACTOR_BOUNDS.1,
            cruise_speed:         1.5,
            accel_max:            1.0,
            decel_max:            2.0,
            turn_rate_max_deg:    180.0,
            detection_radius:     3.0,
            braking_distance:     2.0,
            braking_cone_deg:     30.0,
            stalemate_epsilon:    1e-3,
            lateral_bias:         0.5,
            arrival_epsilon:      0.25,
            dwell_threshold_secs: 10.0,
            unload_wait_secs:     2.0,
            retry_backoff_secs:   1.0,
            starvation_warn_secs: 120.0,
            seed:                 42,
        }
    }
}

impl FleetConfig {
    /// Reject configurations the controllers cannot run with.
    pub fn validate(&self) -> WhResult<()> {
        let positive_f32 = [
            ("cruise_speed",      self.cruise_speed),
            ("accel_max",         self.accel_max),
            ("decel_max",         self.decel_max),
            ("turn_rate_max_deg", self.turn_rate_max_deg),
            ("detection_radius",  self.detection_radius),
            ("arrival_epsilon",   self.arrival_epsilon),
        ];
        for (name, v) in positive_f32 {
            if !(v.is_finite() && v > 0.0) {
                return Err(WhError::Config(format!("{name} must be > 0, got {v}")));
            }
        }

        let non_negative = [
            ("dwell_threshold_secs", self.dwell_threshold_secs),
            ("unload_wait_secs",     self.unload_wait_secs),
            ("retry_backoff_secs",   self.retry_backoff_secs),
            ("starvation_warn_secs", self.starvation_warn_secs),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(WhError::Config(format!("{name} must be >= 0, got {v}")));
            }
        }

        let finite_non_negative = [
            ("braking_distance",  self.braking_distance),
            ("stalemate_epsilon", self.stalemate_epsilon),
            ("lateral_bias",      self.lateral_bias),
        ];
        for (name, v) in finite_non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(WhError::Config(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        if !(self.braking_cone_deg > 0.0 && self.braking_cone_deg <= 90.0) {
            return Err(WhError::Config(format!(
                "braking_cone_deg must be in (0, 90], got {}",
                self.braking_cone_deg
            )));
        }
        if !(self.min_speed_factor > 0.0 && self.min_speed_factor <= self.max_speed_factor) {
            return Err(WhError::Config(format!(
                "speed factor bounds must satisfy 0 < min <= max, got [{}, {}]",
                self.min_speed_factor, self.max_speed_factor
            )));
        }
        if !(self.speed_factor.is_finite() && self.speed_factor > 0.0) {
            return Err(WhError::Config(format!(
                "speed_factor must be > 0, got {}",
                self.speed_factor
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.speed_factor, self.min_speed_factor, self.max_speed_factor)
    }
}
