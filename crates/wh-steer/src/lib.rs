//! `wh-steer` — continuous motion control.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`state`]      | `MotionState` — position, heading, speed                   |
//! | [`params`]     | `SteeringParams` — limits and sensing radii                |
//! | [`controller`] | `SteeringController`, `StepOutcome`                        |
//!
//! # Movement model
//!
//! One call to [`SteeringController::step`] per tick:
//!
//! 1. Attraction toward the target plus linear-falloff repulsion from every
//!    obstacle ahead inside the detection radius.  A near-zero sum, or an
//!    obstacle in the braking cone that pulls almost straight back against
//!    the attraction, gets a deterministic right-hand bias.
//! 2. Desired heading from the combined vector; a degenerate vector keeps
//!    the previous heading.
//! 3. Turn clamped to `turn_rate_max × dt`.
//! 4. Target speed: cruise, scaled down linearly by the nearest obstacle in
//!    the braking cone and by the distance left to the target, both over
//!    `braking_distance` (zero while the desired heading is behind the
//!    vehicle); actual speed ramps toward it with bounded
//!    acceleration/deceleration.
//! 5. Advance along the new heading by `speed × dt`, never past the target.
//!
//! A vehicle with no target calls [`SteeringController::coast`] instead,
//! which ramps its speed down to zero.
//!
//! Nothing here fails; every degenerate input has a defined fallback.

pub mod controller;
pub mod params;
pub mod state;


pub use controller::{SteeringController, StepOutcome};
pub use params::SteeringParams;
pub use state::MotionState;
