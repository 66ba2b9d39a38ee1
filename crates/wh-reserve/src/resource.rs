//! Reservable resource kinds.

use std::fmt;

use wh_core::{SegmentId, StationId};

/// Anything a vehicle may claim exclusively.
///
/// Route segments use the same arbiter as stations; nothing in the fleet
/// plans routes over them yet.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    Station(StationId),
    Segment(SegmentId),
}

impl Resource {
    /// The station, if this resource is one.
    #[inline]
    pub fn station(self) -> Option<StationId> {
        match self {
            Resource::Station(s) => Some(s),
            Resource::Segment(_) => None,
        }
    }
}

impl From<StationId> for Resource {
    fn from(s: StationId) -> Self {
        Resource::Station(s)
    }
}

impl From<SegmentId> for Resource {
    fn from(s: SegmentId) -> Self {
        Resource::Segment(s)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Station(s) => write!(f, "{s}"),
            Resource::Segment(s) => write!(f, "{s}"),
        }
    }
}
