//! Outcomes reported by [`DeliveryCycleMachine::advance`][crate::DeliveryCycleMachine::advance].

use wh_core::{PackageId, StationId};
use wh_station::{Package, StationKind};

/// Something observable that happened to one vehicle during a tick.
///
/// Events are returned in the order they occurred.
#[derive(Clone, Debug, PartialEq)]
pub enum CycleEvent {
    /// A reservation on `station` was granted.
    Reserved { station: StationId, kind: StationKind },

    /// `station` was claimed by another vehicle first; selection runs again
    /// next tick.
    RaceLost { station: StationId },

    /// Nothing suitable was free; the next attempt waits for the backoff.
    BackedOff { kind: StationKind },

    /// The package at pickup `station` is now on board.
    ///
    /// `waited` is simulated seconds between spawn and pickup.
    PickedUp { station: StationId, package: PackageId, waited: f64 },

    /// Cargo put down at drop-off `station`; processing has started.
    Placed { station: StationId, package: PackageId },

    /// Processing finished and the package left the system.
    Delivered { station: StationId, package: Package },

    /// The reservation on `station` was released.
    Released { station: StationId },
}
