//! Running aggregates and the per-tick summary handed to observers.

use wh_core::SimTime;
use wh_fleet::CycleEvent;

/// Accumulators fed from [`CycleEvent`]s as the coordination phase runs.
#[derive(Clone, Debug, Default)]
pub struct FleetMetrics {
    pickups:        u64,
    dwell_total:    f64,
    deliveries:     u64,
    delivery_total: f64,
    race_losses:    u64,
    backoffs:       u64,
}

impl FleetMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &CycleEvent, now: SimTime) {
        match event {
            CycleEvent::PickedUp { waited, .. } => {
                self.pickups += 1;
                self.dwell_total += waited;
            }
            CycleEvent::Delivered { package, .. } => {
                self.deliveries += 1;
                self.delivery_total += now.since(package.spawn_time);
            }
            CycleEvent::RaceLost { .. } => self.race_losses += 1,
            CycleEvent::BackedOff { .. } => self.backoffs += 1,
            CycleEvent::Reserved { .. }
            | CycleEvent::Placed { .. }
            | CycleEvent::Released { .. } => {}
        }
    }

    /// Mean simulated seconds from spawn to pickup.
    pub fn avg_dwell_time(&self) -> f64 {
        mean(self.dwell_total, self.pickups)
    }

    /// Mean simulated seconds from spawn to removal at the drop-off.
    pub fn avg_delivery_time(&self) -> f64 {
        mean(self.delivery_total, self.deliveries)
    }

    pub fn pickups(&self) -> u64 {
        self.pickups
    }

    pub fn race_losses(&self) -> u64 {
        self.race_losses
    }

    pub fn backoffs(&self) -> u64 {
        self.backoffs
    }
}

fn mean(total: f64, n: u64) -> f64 {
    if n == 0 { 0.0 } else { total / n as f64 }
}

// ── FleetSummary ──────────────────────────────────────────────────────────────

/// Plain aggregate counters for display and export.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSummary {
    pub sim_time:          SimTime,
    pub spawned:           u64,
    pub delivered:         u64,
    /// Packages on board a vehicle.
    pub in_flight:         u64,
    /// Packages sitting at a station, waiting at a pickup or in processing
    /// at a drop-off.
    pub resident:          u64,
    /// The share of `resident` still waiting at a pickup.
    pub waiting:           u64,
    /// Longest current wait among packages still at a pickup.
    pub max_wait_time:     f64,
    pub avg_dwell_time:    f64,
    pub avg_delivery_time: f64,
}

impl FleetSummary {
    /// Every package ever spawned is delivered, on board, or at a station.
    pub fn conservation_holds(&self) -> bool {
        self.spawned == self.delivered + self.in_flight + self.resident
    }
}
