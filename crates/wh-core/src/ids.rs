//! Strongly typed, zero-cost identifier wrappers.
//!
//! Stations, vehicles, and packages live in flat arenas; every cross
//! reference is one of these IDs rather than a pointer or a live object, so
//! two handles to the same entity always compare equal.  The inner integer is
//! `pub` for direct indexing, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a vehicle in the fleet arena.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a station (pickup and drop-off share one index space).
    pub struct StationId(u32);
}

typed_id! {
    /// Monotonic package serial, assigned at spawn.  Never reused.
    pub struct PackageId(u64);
}

typed_id! {
    /// Index of a route segment.  Only the reservation arbiter uses these;
    /// no pathfinding is built on top of them.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Index of a static obstacle (shelf, pillar, wall post).
    pub struct ObstacleId(u32);
}
