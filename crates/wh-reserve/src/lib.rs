//! `wh-reserve` — the single source of truth for exclusivity.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`resource`] | `Resource` — a station or a route segment                   |
//! | [`arbiter`]  | `ReservationArbiter`, `ReservationToken<'a>`                |
//! | [`shared`]   | `SharedArbiter` — mutex-guarded arbiter for threaded callers |
//! | [`error`]    | `ReserveError`, `ReserveResult<T>`                          |
//!
//! # Contract
//!
//! - `try_reserve` is a non-blocking check-and-set: at most one live holder
//!   per resource, first successful claimant wins, no queueing.
//! - `release` is idempotent.
//! - Data mutations elsewhere (`StationRegistry::take` / `place`) require a
//!   [`ReservationToken`], which only the arbiter can mint and only for the
//!   current holder.  The token borrows the arbiter, so the reservation
//!   cannot be released while a token for it is alive.

pub mod arbiter;
pub mod error;
pub mod resource;
pub mod shared;

#[cfg(test)]
mod tests;

pub use arbiter::{ReservationArbiter, ReservationToken};
pub use error::{ReserveError, ReserveResult};
pub use resource::Resource;
pub use shared::SharedArbiter;
