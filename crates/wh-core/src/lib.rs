//! `wh-core` — foundational types for the warehouse fleet simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and few external ones (`glam`, `rand`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `VehicleId`, `StationId`, `PackageId`, `SegmentId`, `ObstacleId` |
//! | [`geo`]    | ground-plane heading math, `DegenerateVector`             |
//! | [`time`]   | `Tick`, `SimTime`, `Deadline`, `SimClock`                  |
//! | [`config`] | `FleetConfig`                                              |
//! | [`phase`]  | `Phase` — the delivery-cycle phase of a vehicle            |
//! | [`rng`]    | `SimRng` (seeded layout randomness)                        |
//! | [`error`]  | `WhError`, `WhResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod phase;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::FleetConfig;
pub use error::{WhError, WhResult};
pub use geo::DegenerateVector;
pub use glam::{Vec2, Vec3};
pub use ids::{ObstacleId, PackageId, SegmentId, StationId, VehicleId};
pub use phase::Phase;
pub use rng::SimRng;
pub use time::{DEFAULT_FACTOR_BOUNDS, Deadline, SimClock, SimTime, Tick};
