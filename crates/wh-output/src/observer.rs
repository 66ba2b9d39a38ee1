//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wh_core::{SimTime, StationId, Tick, VehicleId};
use wh_sim::{FleetSummary, SimObserver, StationView, VehicleView};
use wh_station::Package;

use crate::row::{DeliveryRow, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots, tick summaries and
/// deliveries to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &FleetSummary) {
        let row = TickSummaryRow {
            tick:      tick.0,
            sim_time:  summary.sim_time.secs(),
            delivered: summary.delivered,
            spawned:   summary.spawned,
            in_flight: summary.in_flight,
            resident:  summary.resident,
            waiting:   summary.waiting,
            max_wait:  summary.max_wait_time,
            avg_dwell: summary.avg_dwell_time,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(
        &mut self,
        tick:      Tick,
        now:       SimTime,
        vehicles:  &[VehicleView],
        _stations: &[StationView],
    ) {
        let rows: Vec<VehicleSnapshotRow> = vehicles
            .iter()
            .map(|v| VehicleSnapshotRow {
                tick:        tick.0,
                sim_time:    now.secs(),
                vehicle_id:  v.id.0,
                x:           v.position.x,
                z:           v.position.z,
                heading_deg: v.heading_deg,
                speed:       v.speed,
                phase:       v.phase,
                carrying:    v.carrying.map(|p| p.0),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_delivery(&mut self, tick: Tick, vehicle: VehicleId, station: StationId, package: &Package) {
        let row = DeliveryRow {
            tick:         tick.0,
            vehicle_id:   vehicle.0,
            station_id:   station.0,
            package_id:   package.id.0,
            spawn_time:   package.spawn_time.secs(),
            picked_up_at: package.picked_up_at.map_or(f64::NAN, SimTime::secs),
            placed_at:    package.placed_at.map_or(f64::NAN, SimTime::secs),
        };
        let result = self.writer.write_delivery(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _summary: &FleetSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
