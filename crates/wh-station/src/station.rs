//! Fixed points of interest on the warehouse floor.

use std::fmt;

use wh_core::{StationId, Vec3};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationKind {
    /// Intake: packages spawn here.
    Pickup,
    /// Output: packages are held here briefly, then counted as delivered.
    Dropoff,
}

impl StationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StationKind::Pickup  => "pickup",
            StationKind::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A station's immutable identity and placement.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id:       StationId,
    pub kind:     StationKind,
    pub position: Vec3,
}
