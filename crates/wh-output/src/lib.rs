//! `wh-output` — simulation output writers for the warehouse fleet simulator.
//!
//! | Backend | Files created                                                      |
//! |---------|--------------------------------------------------------------------|
//! | CSV     | `vehicle_snapshots.csv`, `tick_summaries.csv`, `deliveries.csv`    |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `wh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(3_000, 1.0 / 30.0, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{DeliveryRow, TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
