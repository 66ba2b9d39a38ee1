//! Read-only per-entity values for the visualization layer.

use wh_core::{PackageId, Phase, SimTime, StationId, Vec3, VehicleId};
use wh_fleet::Vehicle;
use wh_reserve::ReservationArbiter;
use wh_station::{StationKind, StationRegistry};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleView {
    pub id:                       VehicleId,
    pub position:                 Vec3,
    pub heading_deg:              f32,
    pub speed:                    f32,
    pub phase:                    Phase,
    pub carrying:                 Option<PackageId>,
    pub cycles_completed:         u64,
    pub time_since_last_delivery: f64,
    pub starving:                 bool,
}

impl VehicleView {
    pub fn of(vehicle: &Vehicle, now: SimTime) -> Self {
        Self {
            id:                       vehicle.id(),
            position:                 vehicle.motion.position,
            heading_deg:              vehicle.motion.heading_deg,
            speed:                    vehicle.motion.speed,
            phase:                    vehicle.phase(),
            carrying:                 vehicle.carrying().map(|p| p.id),
            cycles_completed:         vehicle.cycle.cycles_completed(),
            time_since_last_delivery: vehicle.cycle.time_since_last_delivery(now),
            starving:                 vehicle.cycle.is_starving(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationView {
    pub id:          StationId,
    pub kind:        StationKind,
    pub position:    Vec3,
    pub has_package: bool,
    /// Seconds the resident package has waited (zero when empty).
    pub wait_time:   f64,
    pub reserved_by: Option<VehicleId>,
}

/// One view per station, in `StationId` order.
pub fn station_views(
    registry: &StationRegistry,
    arbiter:  &ReservationArbiter,
    now:      SimTime,
) -> Vec<StationView> {
    registry
        .stations()
        .iter()
        .map(|s| StationView {
            id:          s.id,
            kind:        s.kind,
            position:    s.position,
            has_package: registry.has_package(s.id),
            wait_time:   registry.wait_time(s.id, now),
            reserved_by: arbiter.holder(s.id),
        })
        .collect()
}
