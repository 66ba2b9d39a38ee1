//! Packages and their ownership.

use wh_core::{PackageId, SimTime, StationId, VehicleId};

/// Who currently owns a package.  Ownership moves in one direction only:
/// pickup station → vehicle → drop-off station → removed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Owner {
    None,
    Station(StationId),
    Vehicle(VehicleId),
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    pub id:           PackageId,
    /// Simulated time at which the package appeared at its pickup station.
    pub spawn_time:   SimTime,
    pub owner:        Owner,
    /// Set by `take`.
    pub picked_up_at: Option<SimTime>,
    /// Set by `place`.
    pub placed_at:    Option<SimTime>,
}

impl Package {
    /// Simulated seconds the package has waited for pickup as of `now`
    /// (frozen once it has been picked up).
    pub fn wait_time(&self, now: SimTime) -> f64 {
        self.picked_up_at.unwrap_or(now).since(self.spawn_time)
    }
}
