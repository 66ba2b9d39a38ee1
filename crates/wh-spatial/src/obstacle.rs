//! Entries of the obstacle snapshot.

use std::fmt;

use wh_core::{ObstacleId, Phase, Vec3, VehicleId};

/// Identity of something that occupies floor space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityRef {
    Vehicle(VehicleId),
    Static(ObstacleId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Vehicle(v) => write!(f, "{v}"),
            EntityRef::Static(o) => write!(f, "{o}"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObstacleKind {
    /// Another vehicle (moves between ticks).
    Dynamic,
    /// Shelving, pillars, posts.
    Static,
}

/// One sensed entity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub entity:   EntityRef,
    pub position: Vec3,
    /// Delivery phase for vehicles; `None` for static structures.
    pub phase:    Option<Phase>,
}

impl Obstacle {
    #[inline]
    pub fn kind(&self) -> ObstacleKind {
        match self.entity {
            EntityRef::Vehicle(_) => ObstacleKind::Dynamic,
            EntityRef::Static(_) => ObstacleKind::Static,
        }
    }
}
