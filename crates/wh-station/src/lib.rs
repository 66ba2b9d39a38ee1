//! `wh-station` — stations, packages, and the floor plan.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`station`]  | `Station`, `StationKind`                                   |
//! | [`package`]  | `Package`, `Owner`                                         |
//! | [`registry`] | `StationRegistry` — resident packages, spawn/take/place    |
//! | [`plan`]     | `FloorPlan`, `VehicleStart` — initial layout               |
//! | [`loader`]   | `load_floor_plan_csv`, `load_floor_plan_reader`            |
//! | [`error`]    | `StationError`, `StationResult<T>`                         |
//!
//! # Package lifecycle
//!
//! ```text
//! spawn_if_due ─► resident at pickup ─take─► carried by vehicle
//!              ─place─► resident at drop-off ─remove_delivered─► counted
//! ```
//!
//! `take`, `place`, and `remove_delivered` require a
//! [`ReservationToken`][wh_reserve::ReservationToken] for the station, so a
//! package can only move through a vehicle that holds the reservation.

pub mod error;
pub mod loader;
pub mod package;
pub mod plan;
pub mod registry;
pub mod station;

#[cfg(test)]
mod tests;

pub use error::{StationError, StationResult};
pub use loader::{load_floor_plan_csv, load_floor_plan_reader};
pub use package::{Owner, Package};
pub use plan::{FloorPlan, VehicleStart};
pub use registry::StationRegistry;
pub use station::{Station, StationKind};
