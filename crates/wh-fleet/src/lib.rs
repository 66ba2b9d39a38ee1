//! `wh-fleet` — the delivery cycle each vehicle runs.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`policy`]  | `CyclePolicy` — arrival tolerance, backoff and unload waits     |
//! | [`world`]   | `CycleView<'a>` / `CycleWorld<'a>` — borrowed shared state      |
//! | [`machine`] | `DeliveryCycleMachine`, `CycleState`                            |
//! | [`event`]   | `CycleEvent` — what happened during one `advance`               |
//! | [`vehicle`] | `Vehicle` — motion state plus its cycle machine                 |
//! | [`error`]   | `CycleError`, `CycleResult<T>`                                  |
//!
//! # Two-step coordination
//!
//! Each tick a vehicle's machine is driven in two steps:
//!
//! 1. **Select** (read-only, may run in parallel): a seeking machine picks a
//!    candidate station from a [`CycleView`].  Pickups are chosen oldest
//!    package first, drop-offs nearest first, skipping stations reserved by
//!    anyone else.
//! 2. **Advance** (sequential, ascending `VehicleId`): the machine claims its
//!    candidate with `try_reserve`, checks arrival, and performs transfers
//!    through a [`CycleWorld`].  A candidate lost to a vehicle that advanced
//!    earlier in the same tick is dropped and re-selected next tick.
//!
//! "Nothing available" is never an error: the machine stays in its seek
//! state and retries after a scaled backoff.  Errors from `advance` mean a
//! transfer failed on the reservation-protected path; the machine releases
//! whatever it holds before returning them.

pub mod error;
pub mod event;
pub mod machine;
pub mod policy;
pub mod vehicle;
pub mod world;


pub use error::{CycleError, CycleResult};
pub use event::CycleEvent;
pub use machine::{CycleState, DeliveryCycleMachine};
pub use policy::CyclePolicy;
pub use vehicle::Vehicle;
pub use world::{CycleView, CycleWorld};
