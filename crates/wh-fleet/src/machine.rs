//! The delivery cycle as an explicit state machine.

use tracing::{debug, error, trace};

use wh_core::geo::planar_distance;
use wh_core::{Deadline, Phase, SimTime, StationId, Vec3, VehicleId};
use wh_station::{Package, StationError, StationKind};

use crate::{CycleError, CycleEvent, CyclePolicy, CycleResult, CycleView, CycleWorld};

/// Upper bound on state changes in one `advance`.  A full cycle has seven
/// states, so this never cuts a legitimate chain short.
const MAX_TRANSITIONS_PER_TICK: usize = 8;

// ── CycleState ────────────────────────────────────────────────────────────────

/// Where a vehicle is in its cycle, plus the data that state needs.
///
/// Timers are [`Deadline`]s on the clock's real timeline, checked on each
/// tick; nothing blocks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CycleState {
    #[default]
    Idle,
    SeekPickup    { retry_at: Option<Deadline> },
    MoveToPickup  { station: StationId },
    Load          { station: StationId },
    SeekDropoff   { retry_at: Option<Deadline> },
    MoveToDropoff { station: StationId },
    /// `release_at` is `None` until the package has been placed.
    Unload        { station: StationId, release_at: Option<Deadline> },
}

impl CycleState {
    pub fn phase(&self) -> Phase {
        match self {
            CycleState::Idle                 => Phase::Idle,
            CycleState::SeekPickup { .. }    => Phase::SeekPickup,
            CycleState::MoveToPickup { .. }  => Phase::MoveToPickup,
            CycleState::Load { .. }          => Phase::Load,
            CycleState::SeekDropoff { .. }   => Phase::SeekDropoff,
            CycleState::MoveToDropoff { .. } => Phase::MoveToDropoff,
            CycleState::Unload { .. }        => Phase::Unload,
        }
    }

    /// The station this state holds a reservation on, if any.
    pub fn reserved_station(&self) -> Option<StationId> {
        match *self {
            CycleState::MoveToPickup { station }
            | CycleState::Load { station }
            | CycleState::MoveToDropoff { station }
            | CycleState::Unload { station, .. } => Some(station),
            _ => None,
        }
    }

    /// The station to steer toward, for travelling states only.
    pub fn travel_target(&self) -> Option<StationId> {
        match *self {
            CycleState::MoveToPickup { station } | CycleState::MoveToDropoff { station } => {
                Some(station)
            }
            _ => None,
        }
    }

    /// States that consume a candidate from [`DeliveryCycleMachine::select`].
    pub fn is_seeking(&self) -> bool {
        matches!(
            self,
            CycleState::Idle | CycleState::SeekPickup { .. } | CycleState::SeekDropoff { .. }
        )
    }

    fn seek(kind: StationKind, retry_at: Option<Deadline>) -> Self {
        match kind {
            StationKind::Pickup  => CycleState::SeekPickup { retry_at },
            StationKind::Dropoff => CycleState::SeekDropoff { retry_at },
        }
    }

    fn travel(kind: StationKind, station: StationId) -> Self {
        match kind {
            StationKind::Pickup  => CycleState::MoveToPickup { station },
            StationKind::Dropoff => CycleState::MoveToDropoff { station },
        }
    }
}

// ── DeliveryCycleMachine ──────────────────────────────────────────────────────

/// One vehicle's endless pickup → drop-off loop.
///
/// ```text
/// Idle → SeekPickup → MoveToPickup → Load → SeekDropoff → MoveToDropoff → Unload → Idle
/// ```
///
/// Drive it with [`select`](Self::select) followed by
/// [`advance`](Self::advance) once per tick, or [`tick`](Self::tick) which
/// does both.
#[derive(Clone, Debug)]
pub struct DeliveryCycleMachine {
    vehicle:       VehicleId,
    policy:        CyclePolicy,
    state:         CycleState,
    cargo:         Option<Package>,
    cycles:        u64,
    last_delivery: SimTime,
    starving:      bool,
}

impl DeliveryCycleMachine {
    pub fn new(vehicle: VehicleId, policy: CyclePolicy) -> Self {
        Self {
            vehicle,
            policy,
            state:         CycleState::Idle,
            cargo:         None,
            cycles:        0,
            last_delivery: SimTime::ZERO,
            starving:      false,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    #[inline]
    pub fn state(&self) -> CycleState {
        self.state
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn cargo(&self) -> Option<&Package> {
        self.cargo.as_ref()
    }

    pub fn policy(&self) -> &CyclePolicy {
        &self.policy
    }

    /// Completed pickup → drop-off round trips.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles
    }

    /// Simulated time of the last delivery (zero before the first one).
    pub fn last_delivery(&self) -> SimTime {
        self.last_delivery
    }

    pub fn time_since_last_delivery(&self, now: SimTime) -> f64 {
        now.since(self.last_delivery)
    }

    /// Latch the starvation flag once `time_since_last_delivery` exceeds
    /// `threshold`.  Returns `true` only on the tick the flag is raised; the
    /// next delivery clears it.
    pub fn check_starvation(&mut self, now: SimTime, threshold: f64) -> bool {
        if self.starving || self.time_since_last_delivery(now) <= threshold {
            return false;
        }
        self.starving = true;
        true
    }

    pub fn is_starving(&self) -> bool {
        self.starving
    }

    // ── Select step ───────────────────────────────────────────────────────

    /// Pick the station a seeking machine would try to claim this tick.
    ///
    /// Returns `None` outside seek states, while a backoff is pending, or
    /// when nothing is free.  Pure: reads `view` only.
    pub fn select(&self, position: Vec3, view: &CycleView<'_>) -> Option<StationId> {
        let me = self.vehicle;
        match self.state {
            CycleState::Idle => view
                .registry
                .oldest_waiting_where(|s| view.arbiter.is_available_to(s, me)),
            CycleState::SeekPickup { retry_at } => {
                if pending(retry_at, view) {
                    return None;
                }
                view.registry.oldest_waiting_where(|s| view.arbiter.is_available_to(s, me))
            }
            CycleState::SeekDropoff { retry_at } => {
                if pending(retry_at, view) {
                    return None;
                }
                view.registry
                    .nearest_free_dropoff(position, |s| view.arbiter.is_available_to(s, me))
            }
            _ => None,
        }
    }

    // ── Advance step ──────────────────────────────────────────────────────

    /// Run this tick's transitions.
    ///
    /// `candidate` is what [`select`](Self::select) returned at the start of
    /// the tick; it is only used by a machine that was already seeking then.
    /// A seek state entered during this call waits for the next tick's
    /// selection.
    ///
    /// # Errors
    ///
    /// A failed transfer on the reservation-protected path.  Any held
    /// reservation is released first and the machine falls back to the
    /// matching seek state, so an error never leaks a reservation.
    pub fn advance(
        &mut self,
        position:  Vec3,
        candidate: Option<StationId>,
        world:     &mut CycleWorld<'_>,
    ) -> CycleResult<Vec<CycleEvent>> {
        let mut events = Vec::new();
        match self.run(position, candidate, world, &mut events) {
            Ok(())   => Ok(events),
            Err(err) => {
                error!(vehicle = %self.vehicle, state = ?self.state, %err, "delivery cycle fault");
                self.abort(world);
                Err(err)
            }
        }
    }

    /// [`select`](Self::select) then [`advance`](Self::advance) against the
    /// same world.  Convenient when vehicles are coordinated one at a time.
    pub fn tick(&mut self, position: Vec3, world: &mut CycleWorld<'_>) -> CycleResult<Vec<CycleEvent>> {
        let candidate = self.select(position, &world.view());
        self.advance(position, candidate, world)
    }

    /// Release everything this vehicle holds and return to seeking.  Cargo
    /// stays on board; a package already placed by an unfinished unload is
    /// taken back on board first, so the drop-off is left empty.
    pub fn abort(&mut self, world: &mut CycleWorld<'_>) {
        if let CycleState::Unload { station, release_at: Some(_) } = self.state {
            self.reclaim(station, world);
        }
        for resource in world.arbiter.release_all(self.vehicle) {
            debug!(vehicle = %self.vehicle, %resource, "released on abort");
        }
        let next = if self.cargo.is_some() {
            CycleState::SeekDropoff { retry_at: None }
        } else {
            CycleState::Idle
        };
        self.transition(next);
    }

    fn run(
        &mut self,
        position:  Vec3,
        candidate: Option<StationId>,
        world:     &mut CycleWorld<'_>,
        events:    &mut Vec<CycleEvent>,
    ) -> CycleResult<()> {
        let mut selection = self.state.is_seeking().then_some(candidate);

        for _ in 0..MAX_TRANSITIONS_PER_TICK {
            let next = match self.state {
                CycleState::Idle => Some(CycleState::SeekPickup { retry_at: None }),
                CycleState::SeekPickup { retry_at } => {
                    self.seek(StationKind::Pickup, retry_at, selection.take(), world, events)
                }
                CycleState::MoveToPickup { station } => self
                    .arrived(position, station, world)?
                    .then_some(CycleState::Load { station }),
                CycleState::Load { station } => Some(self.load(station, world, events)?),
                CycleState::SeekDropoff { retry_at } => {
                    self.seek(StationKind::Dropoff, retry_at, selection.take(), world, events)
                }
                CycleState::MoveToDropoff { station } => self
                    .arrived(position, station, world)?
                    .then_some(CycleState::Unload { station, release_at: None }),
                CycleState::Unload { station, release_at } => {
                    self.unload(station, release_at, world, events)?
                }
            };
            match next {
                Some(state) => self.transition(state),
                None => break,
            }
        }
        Ok(())
    }

    // ── Per-state handlers ────────────────────────────────────────────────

    /// `selection` is `None` when this seek state was entered mid-tick,
    /// `Some(None)` when selection found nothing.
    fn seek(
        &mut self,
        kind:      StationKind,
        retry_at:  Option<Deadline>,
        selection: Option<Option<StationId>>,
        world:     &mut CycleWorld<'_>,
        events:    &mut Vec<CycleEvent>,
    ) -> Option<CycleState> {
        let candidate = selection?;
        if retry_at.is_some_and(|d| !world.clock.is_due(d)) {
            return None;
        }
        let Some(station) = candidate else {
            let retry_at = world.clock.schedule(self.policy.retry_backoff_secs);
            trace!(vehicle = %self.vehicle, %kind, "nothing free, backing off");
            events.push(CycleEvent::BackedOff { kind });
            return Some(CycleState::seek(kind, Some(retry_at)));
        };
        if world.arbiter.try_reserve(station, self.vehicle) {
            events.push(CycleEvent::Reserved { station, kind });
            Some(CycleState::travel(kind, station))
        } else {
            trace!(vehicle = %self.vehicle, %station, "reservation race lost");
            events.push(CycleEvent::RaceLost { station });
            Some(CycleState::seek(kind, None))
        }
    }

    fn arrived(&self, position: Vec3, station: StationId, world: &CycleWorld<'_>) -> CycleResult<bool> {
        let target = world.registry.station(station)?.position;
        Ok(planar_distance(position, target) <= self.policy.arrival_epsilon)
    }

    /// Take the package and give the pickup back immediately.
    fn load(
        &mut self,
        station: StationId,
        world:   &mut CycleWorld<'_>,
        events:  &mut Vec<CycleEvent>,
    ) -> CycleResult<CycleState> {
        let now = world.clock.sim_time();
        let token = world.arbiter.authorize(station, self.vehicle)?;
        let package = world.registry.take(station, &token, now)?;
        world.arbiter.release(station);

        events.push(CycleEvent::PickedUp {
            station,
            package: package.id,
            waited:  package.wait_time(now),
        });
        events.push(CycleEvent::Released { station });
        self.cargo = Some(package);
        Ok(CycleState::SeekDropoff { retry_at: None })
    }

    /// Place on first entry, then hold until the processing wait is over.
    fn unload(
        &mut self,
        station:    StationId,
        release_at: Option<Deadline>,
        world:      &mut CycleWorld<'_>,
        events:     &mut Vec<CycleEvent>,
    ) -> CycleResult<Option<CycleState>> {
        let now = world.clock.sim_time();
        match release_at {
            None => {
                // Mirror `place`'s checks while the cargo is still aboard.
                if world.registry.station(station)?.kind != StationKind::Dropoff {
                    return Err(StationError::WrongKind { station, expected: StationKind::Dropoff }.into());
                }
                if world.registry.has_package(station) {
                    return Err(StationError::StationOccupied(station).into());
                }
                let token = world.arbiter.authorize(station, self.vehicle)?;
                let package = self.cargo.take().ok_or(CycleError::NoCargo(self.vehicle))?;
                let package_id = package.id;
                world.registry.place(station, package, &token, now)?;
                events.push(CycleEvent::Placed { station, package: package_id });
                let release_at = world.clock.schedule(self.policy.unload_wait_secs);
                Ok(Some(CycleState::Unload { station, release_at: Some(release_at) }))
            }
            Some(deadline) if !world.clock.is_due(deadline) => Ok(None),
            Some(_) => {
                let token = world.arbiter.authorize(station, self.vehicle)?;
                let package = world.registry.remove_delivered(station, &token, now)?;
                world.arbiter.release(station);

                self.cycles += 1;
                self.last_delivery = now;
                self.starving = false;
                events.push(CycleEvent::Released { station });
                events.push(CycleEvent::Delivered { station, package });
                Ok(Some(CycleState::Idle))
            }
        }
    }

    fn reclaim(&mut self, station: StationId, world: &mut CycleWorld<'_>) {
        if !world.arbiter.try_reserve(station, self.vehicle) {
            error!(vehicle = %self.vehicle, %station, "placed package stranded, drop-off held by another vehicle");
            return;
        }
        let reclaimed = match world.arbiter.authorize(station, self.vehicle) {
            Ok(token) => world.registry.reclaim(station, &token).map_err(CycleError::from),
            Err(err) => Err(err.into()),
        };
        match reclaimed {
            Ok(package) => {
                debug!(vehicle = %self.vehicle, %station, package = %package.id, "placed package back on board");
                self.cargo = Some(package);
            }
            Err(err) => error!(vehicle = %self.vehicle, %station, %err, "placed package stranded"),
        }
    }

    fn transition(&mut self, next: CycleState) {
        if next.phase() != self.state.phase() {
            debug!(
                vehicle = %self.vehicle,
                from = %self.state.phase(),
                to = %next.phase(),
                "cycle transition"
            );
        }
        self.state = next;
    }
}

/// A backoff is set and not yet due.
fn pending(retry_at: Option<Deadline>, view: &CycleView<'_>) -> bool {
    retry_at.is_some_and(|d| !view.clock.is_due(d))
}
