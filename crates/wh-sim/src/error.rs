use thiserror::Error;

use wh_core::{VehicleId, WhError};
use wh_fleet::CycleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] WhError),

    #[error("invalid floor plan: {0}")]
    Layout(String),

    /// A transfer failed on the reservation-protected path.  Always a bug.
    #[error("coordination fault for vehicle {vehicle}: {source}")]
    Coordination {
        vehicle: VehicleId,
        #[source]
        source:  CycleError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
