//! `wh-spatial` — what the lidar can see.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`field`] | `ObstacleField` (R-tree snapshot), `ObstacleFieldBuilder`     |
//! | [`obstacle`] | `Obstacle`, `EntityRef`, `ObstacleKind`                    |
//!
//! The field is built once per tick from every vehicle position (before any
//! vehicle moves) plus the static structures, and is read-only afterwards.
//! Steering math can therefore be tested against a hand-built field without
//! simulating a fleet.

pub mod field;
pub mod obstacle;

#[cfg(test)]
mod tests;

pub use field::{ObstacleField, ObstacleFieldBuilder};
pub use obstacle::{EntityRef, Obstacle, ObstacleKind};
