//! `wh-sim` — tick loop orchestrator for the warehouse fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! each frame (real_dt):
//!   ① Clock       — advance real and simulated time (dt = real_dt × factor).
//!   ② Spawn       — restock pickups that have dwelled empty long enough.
//!   ③ Snapshot    — ObstacleField from every vehicle's start-of-tick position.
//!   ④ Plan        — steering steps + candidate selection, read-only
//!                   (parallel with the `parallel` feature).
//!   ⑤ Move        — apply steering steps.
//!   ⑥ Coordinate  — for each vehicle in ascending VehicleId order:
//!                     claim candidate   → try_reserve (first claimant wins)
//!                     arrived at pickup → take, release pickup
//!                     arrived at drop   → place, hold, remove, release
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the plan phase on Rayon's thread pool.            |
//! | `serde`    | `Serialize`/`Deserialize` for views and summaries.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::{FleetConfig, Vec3};
//! use wh_sim::{NoopObserver, SimBuilder};
//! use wh_station::FloorPlan;
//!
//! let plan = FloorPlan::new()
//!     .pickup(Vec3::new(0.0, 0.0, 20.0))
//!     .dropoff(Vec3::new(0.0, 0.0, -20.0))
//!     .vehicle(Vec3::ZERO, 0.0);
//! let mut sim = SimBuilder::new(FleetConfig::default(), plan).build()?;
//! sim.run(3_000, 1.0 / 30.0, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod view;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{FleetMetrics, FleetSummary};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use view::{StationView, VehicleView};
