//! Steering limits.

use wh_core::FleetConfig;

/// The subset of [`FleetConfig`] the controller needs, in `f32`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteeringParams {
    pub cruise_speed:      f32,
    pub accel_max:         f32,
    pub decel_max:         f32,
    pub turn_rate_max_deg: f32,
    pub detection_radius:  f32,
    pub braking_distance:  f32,
    pub braking_cone_deg:  f32,
    pub stalemate_epsilon: f32,
    pub lateral_bias:      f32,
}

impl SteeringParams {
    /// Radius the caller should query the obstacle field with.
    #[inline]
    pub fn sense_radius(&self) -> f32 {
        self.detection_radius.max(self.braking_distance)
    }
}

impl From<&FleetConfig> for SteeringParams {
    fn from(c: &FleetConfig) -> Self {
        Self {
            cruise_speed:      c.cruise_speed,
            accel_max:         c.accel_max,
            decel_max:         c.decel_max,
            turn_rate_max_deg: c.turn_rate_max_deg,
            detection_radius:  c.detection_radius,
            braking_distance:  c.braking_distance,
            braking_cone_deg:  c.braking_cone_deg,
            stalemate_epsilon: c.stalemate_epsilon,
            lateral_bias:      c.lateral_bias,
        }
    }
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self::from(&FleetConfig::default())
    }
}
