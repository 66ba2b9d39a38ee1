//! Delivery-cycle phase shared by the fleet, the obstacle field, and output.

/// Where a vehicle is in its pickup → drop-off cycle.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Between cycles; about to look for work.
    #[default]
    Idle,
    /// Looking for a pickup station with a waiting package.
    SeekPickup,
    /// Driving to the reserved pickup station.
    MoveToPickup,
    /// At the pickup station, taking the package.
    Load,
    /// Carrying a package, looking for a free drop-off station.
    SeekDropoff,
    /// Driving to the reserved drop-off station.
    MoveToDropoff,
    /// At the drop-off station, holding the package for processing.
    Unload,
}

impl Phase {
    /// Human-readable label, useful for CSV column values and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle          => "idle",
            Phase::SeekPickup    => "seeking-pickup",
            Phase::MoveToPickup  => "to-pickup",
            Phase::Load          => "loading",
            Phase::SeekDropoff   => "seeking-dropoff",
            Phase::MoveToDropoff => "to-dropoff",
            Phase::Unload        => "unloading",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
