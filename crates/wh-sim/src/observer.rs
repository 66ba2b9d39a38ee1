//! Simulation observer trait for progress reporting and data collection.

use wh_core::{SimTime, StationId, Tick, VehicleId};
use wh_station::Package;

use crate::{FleetSummary, StationView, VehicleView};

/// Callbacks invoked by [`Sim::step`][crate::Sim::step] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — delivery counter
///
/// ```rust,ignore
/// struct Deliveries(u64);
///
/// impl SimObserver for Deliveries {
///     fn on_delivery(&mut self, _tick: Tick, _v: VehicleId, _s: StationId, _p: &Package) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the clock advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the aggregate counters.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &FleetSummary) {}

    /// Called every `snapshot_interval` ticks with plain per-vehicle and
    /// per-station values, so output writers need no knowledge of the
    /// simulation internals.
    fn on_snapshot(
        &mut self,
        _tick:     Tick,
        _now:      SimTime,
        _vehicles: &[VehicleView],
        _stations: &[StationView],
    ) {}

    /// Called once for every package that leaves the system.
    fn on_delivery(
        &mut self,
        _tick:    Tick,
        _vehicle: VehicleId,
        _station: StationId,
        _package: &Package,
    ) {}

    /// Called once by [`Sim::run`][crate::Sim::run] after the final tick.
    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &FleetSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
