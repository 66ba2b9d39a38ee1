//! Plain data row types written by output backends.

use wh_core::Phase;

/// One vehicle's pose and cycle phase at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:        u64,
    pub sim_time:    f64,
    pub vehicle_id:  u32,
    pub x:           f32,
    pub z:           f32,
    pub heading_deg: f32,
    pub speed:       f32,
    pub phase:       Phase,
    /// Package on board, if any.
    pub carrying:    Option<u64>,
}

/// Fleet-wide counters at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:      u64,
    pub sim_time:  f64,
    pub delivered: u64,
    pub spawned:   u64,
    pub in_flight: u64,
    pub resident:  u64,
    pub waiting:   u64,
    pub max_wait:  f64,
    pub avg_dwell: f64,
}

/// One package leaving the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryRow {
    pub tick:         u64,
    pub vehicle_id:   u32,
    pub station_id:   u32,
    pub package_id:   u64,
    pub spawn_time:   f64,
    /// `NaN` if the package somehow skipped pickup.
    pub picked_up_at: f64,
    pub placed_at:    f64,
}
