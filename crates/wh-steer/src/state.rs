//! Per-vehicle motion state.

use wh_core::Vec3;
use wh_core::geo::{heading_vector, lift};

/// Where a vehicle is, which way it faces, and how fast it goes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionState {
    pub position:    Vec3,
    /// Degrees from `+z` toward `+x`, in `[-180, 180)`.
    pub heading_deg: f32,
    /// Current speed, m/s.  Never negative.
    pub speed:       f32,
}

impl MotionState {
    /// A stopped vehicle at `position` facing `heading_deg`.
    pub fn at_rest(position: Vec3, heading_deg: f32) -> Self {
        Self { position, heading_deg: wh_core::geo::wrap_deg(heading_deg), speed: 0.0 }
    }

    /// Unit facing vector in world space (`y = 0`).
    #[inline]
    pub fn facing(&self) -> Vec3 {
        lift(heading_vector(self.heading_deg), 0.0)
    }
}
