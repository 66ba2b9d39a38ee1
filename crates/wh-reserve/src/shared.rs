//! Thread-safe wrapper for callers that drive vehicles from OS threads.
//!
//! The tick loop in `wh-sim` is cooperative and single-writer, so it uses
//! [`ReservationArbiter`] directly.  `SharedArbiter` serialises every
//! check-and-set behind a mutex so that two threads racing for the same
//! resource see exactly one winner.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use wh_core::VehicleId;

use crate::{ReservationArbiter, Resource};

/// Cloneable handle to a mutex-guarded arbiter.
#[derive(Clone, Default)]
pub struct SharedArbiter {
    inner: Arc<Mutex<ReservationArbiter>>,
}

impl SharedArbiter {
    pub fn new(arbiter: ReservationArbiter) -> Self {
        Self { inner: Arc::new(Mutex::new(arbiter)) }
    }

    /// Lock the arbiter for a compound operation.
    ///
    /// A poisoned lock is recovered: every arbiter method leaves the map in a
    /// consistent state before it can panic.
    pub fn lock(&self) -> MutexGuard<'_, ReservationArbiter> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn try_reserve(&self, resource: impl Into<Resource>, holder: VehicleId) -> bool {
        self.lock().try_reserve(resource, holder)
    }

    pub fn release(&self, resource: impl Into<Resource>) -> Option<VehicleId> {
        self.lock().release(resource)
    }

    pub fn is_free(&self, resource: impl Into<Resource>) -> bool {
        self.lock().is_free(resource)
    }

    pub fn holder(&self, resource: impl Into<Resource>) -> Option<VehicleId> {
        self.lock().holder(resource)
    }
}
