//! `ReservationArbiter` — non-blocking check-and-set claims.

use std::marker::PhantomData;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use wh_core::VehicleId;

use crate::{ReserveError, ReserveResult, Resource};

/// A live claim: who holds the resource and when it was granted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Grant {
    holder: VehicleId,
    /// Position in the arbiter's monotonic grant sequence.
    order:  u64,
}

/// Grants and releases exclusive claims on stations and route segments.
///
/// There is no waiting list: a losing caller gets `false` (or
/// `ResourceUnavailable`) and is expected to re-select on a later tick.  No
/// FIFO fairness is provided across vehicles.
#[derive(Default, Debug)]
pub struct ReservationArbiter {
    held:       FxHashMap<Resource, Grant>,
    next_order: u64,
    granted:    u64,
    released:   u64,
}

impl ReservationArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `resource` for `holder`.
    ///
    /// Returns `true` if the resource was free (a new grant is recorded) or
    /// is already held by `holder` (no new grant).  Returns `false` without
    /// side effects if a different vehicle holds it.
    pub fn try_reserve(&mut self, resource: impl Into<Resource>, holder: VehicleId) -> bool {
        self.reserve(resource, holder).is_ok()
    }

    /// Like [`try_reserve`](Self::try_reserve) but reports who won.
    pub fn reserve(&mut self, resource: impl Into<Resource>, holder: VehicleId) -> ReserveResult<()> {
        let resource = resource.into();
        match self.held.get(&resource) {
            Some(g) if g.holder == holder => Ok(()),
            Some(g) => {
                trace!(%resource, %holder, winner = %g.holder, "reservation race lost");
                Err(ReserveError::ResourceUnavailable { resource, holder: g.holder })
            }
            None => {
                let order = self.next_order;
                self.next_order += 1;
                self.granted += 1;
                self.held.insert(resource, Grant { holder, order });
                debug!(%resource, %holder, order, "reservation granted");
                Ok(())
            }
        }
    }

    /// Clear the holder of `resource`, returning who held it.
    ///
    /// Calling this on a free resource is a no-op.
    pub fn release(&mut self, resource: impl Into<Resource>) -> Option<VehicleId> {
        let resource = resource.into();
        let grant = self.held.remove(&resource)?;
        self.released += 1;
        debug!(%resource, holder = %grant.holder, "reservation released");
        Some(grant.holder)
    }

    /// Release every resource held by `holder`, in grant order.
    pub fn release_all(&mut self, holder: VehicleId) -> Vec<Resource> {
        let resources = self.held_by(holder);
        for &r in &resources {
            self.release(r);
        }
        resources
    }

    pub fn is_free(&self, resource: impl Into<Resource>) -> bool {
        !self.held.contains_key(&resource.into())
    }

    pub fn holder(&self, resource: impl Into<Resource>) -> Option<VehicleId> {
        self.held.get(&resource.into()).map(|g| g.holder)
    }

    /// `true` if `resource` is free or already held by `holder`.
    pub fn is_available_to(&self, resource: impl Into<Resource>, holder: VehicleId) -> bool {
        self.holder(resource).is_none_or(|h| h == holder)
    }

    /// Grant sequence number of the live claim on `resource`.
    pub fn grant_order(&self, resource: impl Into<Resource>) -> Option<u64> {
        self.held.get(&resource.into()).map(|g| g.order)
    }

    /// All resources currently held by `holder`, sorted by grant order.
    pub fn held_by(&self, holder: VehicleId) -> Vec<Resource> {
        let mut grants: Vec<(u64, Resource)> = self
            .held
            .iter()
            .filter(|(_, g)| g.holder == holder)
            .map(|(&r, g)| (g.order, r))
            .collect();
        grants.sort_unstable_by_key(|&(order, _)| order);
        grants.into_iter().map(|(_, r)| r).collect()
    }

    /// Mint a token proving that `holder` currently holds `resource`.
    ///
    /// # Errors
    ///
    /// `Unauthorized` if `resource` is free or held by someone else.
    pub fn authorize(
        &self,
        resource: impl Into<Resource>,
        holder:   VehicleId,
    ) -> ReserveResult<ReservationToken<'_>> {
        let resource = resource.into();
        match self.held.get(&resource) {
            Some(g) if g.holder == holder => Ok(ReservationToken {
                resource,
                holder,
                order: g.order,
                _arbiter: PhantomData,
            }),
            _ => Err(ReserveError::Unauthorized { resource, holder }),
        }
    }

    /// Number of live reservations.
    pub fn live_count(&self) -> usize {
        self.held.len()
    }

    /// Total grants since creation.
    pub fn granted_total(&self) -> u64 {
        self.granted
    }

    /// Total releases of live claims since creation (no-op releases excluded).
    pub fn released_total(&self) -> u64 {
        self.released
    }
}

// ── ReservationToken ──────────────────────────────────────────────────────────

/// Proof that a vehicle holds a reservation.
///
/// Only [`ReservationArbiter::authorize`] creates tokens.  The token borrows
/// the arbiter immutably, so the claim it describes cannot be released (or
/// re-granted) while the token exists.
#[derive(Debug, Clone, Copy)]
pub struct ReservationToken<'a> {
    resource: Resource,
    holder:   VehicleId,
    order:    u64,
    _arbiter: PhantomData<&'a ReservationArbiter>,
}

impl ReservationToken<'_> {
    #[inline]
    pub fn resource(&self) -> Resource {
        self.resource
    }

    #[inline]
    pub fn holder(&self) -> VehicleId {
        self.holder
    }

    #[inline]
    pub fn order(&self) -> u64 {
        self.order
    }
}
