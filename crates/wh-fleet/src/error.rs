use thiserror::Error;

use wh_core::VehicleId;
use wh_reserve::ReserveError;
use wh_station::StationError;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Reserve(#[from] ReserveError),

    #[error("vehicle {0} reached its drop-off without cargo")]
    NoCargo(VehicleId),
}

pub type CycleResult<T> = Result<T, CycleError>;
