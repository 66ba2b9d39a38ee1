//! The `OutputWriter` trait implemented by backend writers.

use crate::{DeliveryRow, OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Trait implemented by output backends.
///
/// Write errors never reach the sim.  The observer keeps the first one;
/// retrieve it with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write one delivery row.
    fn write_delivery(&mut self, row: &DeliveryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
