use thiserror::Error;

use wh_core::{StationId, VehicleId};

use crate::StationKind;

/// Errors produced by `wh-station`.
///
/// `StationEmpty`, `StationOccupied`, and `Unauthorized` outside the
/// reservation-protected path mean the fleet coordination is broken; tests
/// treat them as fatal.
#[derive(Debug, Error)]
pub enum StationError {
    #[error("station {0} not found")]
    UnknownStation(StationId),

    #[error("station {station} is not a {expected} station")]
    WrongKind {
        station:  StationId,
        expected: StationKind,
    },

    #[error("station {0} has no resident package")]
    StationEmpty(StationId),

    #[error("station {0} already holds a package")]
    StationOccupied(StationId),

    #[error("{holder} has no reservation on station {station}")]
    Unauthorized {
        station: StationId,
        holder:  VehicleId,
    },

    #[error("floor plan parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StationResult<T> = Result<T, StationError>;
