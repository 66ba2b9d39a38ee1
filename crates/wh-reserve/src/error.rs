use thiserror::Error;

use wh_core::VehicleId;

use crate::Resource;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReserveError {
    /// Another vehicle holds the resource.  Recovered by re-selecting work;
    /// never surfaced to the user.
    #[error("{resource} is held by {holder}")]
    ResourceUnavailable {
        resource: Resource,
        holder:   VehicleId,
    },

    /// `holder` asked for a token on a resource it does not hold.
    #[error("{holder} does not hold {resource}")]
    Unauthorized {
        resource: Resource,
        holder:   VehicleId,
    },
}

pub type ReserveResult<T> = Result<T, ReserveError>;
