//! Borrowed views of the state shared by every vehicle.

use wh_core::SimClock;
use wh_reserve::ReservationArbiter;
use wh_station::StationRegistry;

/// Read-only snapshot used by the select step.
///
/// Built once per tick and shared across all machines; nothing can mutate
/// the registry or arbiter while a view is alive.
#[derive(Copy, Clone)]
pub struct CycleView<'a> {
    pub registry: &'a StationRegistry,
    pub arbiter:  &'a ReservationArbiter,
    pub clock:    &'a SimClock,
}

impl<'a> CycleView<'a> {
    #[inline]
    pub fn new(
        registry: &'a StationRegistry,
        arbiter:  &'a ReservationArbiter,
        clock:    &'a SimClock,
    ) -> Self {
        Self { registry, arbiter, clock }
    }
}

/// Mutable access for the advance step.  Only one machine holds it at a
/// time.
pub struct CycleWorld<'a> {
    pub registry: &'a mut StationRegistry,
    pub arbiter:  &'a mut ReservationArbiter,
    pub clock:    &'a SimClock,
}

impl<'a> CycleWorld<'a> {
    #[inline]
    pub fn new(
        registry: &'a mut StationRegistry,
        arbiter:  &'a mut ReservationArbiter,
        clock:    &'a SimClock,
    ) -> Self {
        Self { registry, arbiter, clock }
    }

    /// Reborrow as a read-only view.
    pub fn view(&self) -> CycleView<'_> {
        CycleView::new(self.registry, self.arbiter, self.clock)
    }
}
