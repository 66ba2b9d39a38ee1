//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`
//! - `deliveries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DeliveryRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

pub const SNAPSHOT_HEADER: [&str; 9] =
    ["tick", "sim_time", "vehicle_id", "x", "z", "heading_deg", "speed", "phase", "carrying"];

pub const SUMMARY_HEADER: [&str; 9] =
    ["tick", "sim_time", "delivered", "spawned", "in_flight", "resident", "waiting", "max_wait", "avg_dwell"];

pub const DELIVERY_HEADER: [&str; 7] =
    ["tick", "vehicle_id", "station_id", "package_id", "spawn_time", "picked_up_at", "placed_at"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots:  Writer<File>,
    summaries:  Writer<File>,
    deliveries: Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut deliveries = Writer::from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record(DELIVERY_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            deliveries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.sim_time.to_string(),
                row.vehicle_id.to_string(),
                row.x.to_string(),
                row.z.to_string(),
                row.heading_deg.to_string(),
                row.speed.to_string(),
                row.phase.as_str().to_owned(),
                row.carrying.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.sim_time.to_string(),
            row.delivered.to_string(),
            row.spawned.to_string(),
            row.in_flight.to_string(),
            row.resident.to_string(),
            row.waiting.to_string(),
            row.max_wait.to_string(),
            row.avg_dwell.to_string(),
        ])?;
        Ok(())
    }

    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()> {
        self.deliveries.write_record(&[
            row.tick.to_string(),
            row.vehicle_id.to_string(),
            row.station_id.to_string(),
            row.package_id.to_string(),
            row.spawn_time.to_string(),
            row.picked_up_at.to_string(),
            row.placed_at.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.deliveries.flush()?;
        Ok(())
    }
}
