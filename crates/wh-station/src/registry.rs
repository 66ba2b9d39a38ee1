//! `StationRegistry` — the station arena and every resident package.

use tracing::{debug, info};

use wh_core::{PackageId, SimTime, StationId, Vec3};
use wh_core::geo::planar_distance;
use wh_reserve::{ReservationToken, Resource};

use crate::{FloorPlan, Owner, Package, Station, StationError, StationKind, StationResult};

/// Stations plus per-station package state, stored as flat arrays indexed by
/// `StationId`.
///
/// The registry does not decide *who* may touch a station; that is the
/// arbiter's job.  Every mutation that moves a package requires a
/// [`ReservationToken`] for the station, so the two checks cannot drift
/// apart.
#[derive(Debug, Default)]
pub struct StationRegistry {
    stations:     Vec<Station>,
    resident:     Vec<Option<Package>>,
    /// `None` until the station is first emptied.
    last_removal: Vec<Option<SimTime>>,
    next_package: u64,
    spawned:      u64,
    delivered:    u64,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with every pickup of `plan` followed by every
    /// drop-off.  Station IDs follow that order.
    pub fn from_plan(plan: &FloorPlan) -> Self {
        let mut reg = Self::new();
        for &p in &plan.pickups {
            reg.add_station(StationKind::Pickup, p);
        }
        for &p in &plan.dropoffs {
            reg.add_station(StationKind::Dropoff, p);
        }
        reg
    }

    /// Add a station and return its ID (sequential from 0).
    ///
    /// A new pickup has never been emptied, so it spawns on the first
    /// `spawn_if_due` call regardless of the dwell threshold.
    pub fn add_station(&mut self, kind: StationKind, position: Vec3) -> StationId {
        let id = StationId(self.stations.len() as u32);
        self.stations.push(Station { id, kind, position });
        self.resident.push(None);
        self.last_removal.push(None);
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn station(&self, id: StationId) -> StationResult<&Station> {
        self.stations.get(id.index()).ok_or(StationError::UnknownStation(id))
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn pickups(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter().filter(|s| s.kind == StationKind::Pickup)
    }

    pub fn dropoffs(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter().filter(|s| s.kind == StationKind::Dropoff)
    }

    pub fn resident(&self, id: StationId) -> Option<&Package> {
        self.resident.get(id.index()).and_then(Option::as_ref)
    }

    pub fn has_package(&self, id: StationId) -> bool {
        self.resident(id).is_some()
    }

    /// How long the resident package has been waiting at `id`, or zero.
    pub fn wait_time(&self, id: StationId, now: SimTime) -> f64 {
        self.resident(id).map_or(0.0, |p| now.since(p.spawn_time))
    }

    /// Simulated time at which `id` last had a package removed, or `None`
    /// if it never has.
    pub fn last_removal(&self, id: StationId) -> Option<SimTime> {
        self.last_removal.get(id.index()).copied().flatten()
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Spawn a package at pickup `id` if it is empty and has been empty for
    /// at least `dwell_threshold` simulated seconds since its last removal.
    /// A station that was never emptied spawns immediately.
    ///
    /// Returns the new package's ID, or `None` if nothing spawned.  Calling
    /// this while a package is already resident is a no-op.
    pub fn spawn_if_due(
        &mut self,
        id:              StationId,
        now:             SimTime,
        dwell_threshold: f64,
    ) -> StationResult<Option<PackageId>> {
        self.expect_kind(id, StationKind::Pickup)?;
        let i = id.index();
        let dwelling = self.last_removal[i].is_some_and(|t| now.since(t) < dwell_threshold);
        if self.resident[i].is_some() || dwelling {
            return Ok(None);
        }

        let pkg_id = PackageId(self.next_package);
        self.next_package += 1;
        self.spawned += 1;
        self.resident[i] = Some(Package {
            id:           pkg_id,
            spawn_time:   now,
            owner:        Owner::Station(id),
            picked_up_at: None,
            placed_at:    None,
        });
        debug!(station = %id, package = %pkg_id, %now, "package spawned");
        Ok(Some(pkg_id))
    }

    /// Run [`spawn_if_due`](Self::spawn_if_due) on every pickup station.
    pub fn spawn_due(&mut self, now: SimTime, dwell_threshold: f64) -> Vec<(StationId, PackageId)> {
        let pickups: Vec<StationId> = self.pickups().map(|s| s.id).collect();
        pickups
            .into_iter()
            .filter_map(|id| match self.spawn_if_due(id, now, dwell_threshold) {
                Ok(Some(pkg)) => Some((id, pkg)),
                _ => None,
            })
            .collect()
    }

    // ── Transfers ─────────────────────────────────────────────────────────

    /// Hand the package resident at pickup `id` to the token's holder.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `token` is not for `id`.
    /// - `StationEmpty` if there is nothing to take.
    pub fn take(
        &mut self,
        id:    StationId,
        token: &ReservationToken<'_>,
        now:   SimTime,
    ) -> StationResult<Package> {
        self.expect_kind(id, StationKind::Pickup)?;
        check_token(id, token)?;
        let i = id.index();
        let mut pkg = self.resident[i].take().ok_or(StationError::StationEmpty(id))?;
        self.last_removal[i] = Some(now);
        pkg.owner = Owner::Vehicle(token.holder());
        pkg.picked_up_at = Some(now);
        debug!(station = %id, package = %pkg.id, vehicle = %token.holder(), "package taken");
        Ok(pkg)
    }

    /// Put `package` down at drop-off `id` for processing.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if `token` is not for `id`.
    /// - `StationOccupied` if a package is already waiting for removal.  The
    ///   rejected package is dropped with the error, so callers must only
    ///   reach this through the reservation-protected path.
    pub fn place(
        &mut self,
        id:          StationId,
        mut package: Package,
        token:       &ReservationToken<'_>,
        now:         SimTime,
    ) -> StationResult<()> {
        self.expect_kind(id, StationKind::Dropoff)?;
        check_token(id, token)?;
        let i = id.index();
        if self.resident[i].is_some() {
            return Err(StationError::StationOccupied(id));
        }
        package.owner = Owner::Station(id);
        package.placed_at = Some(now);
        debug!(station = %id, package = %package.id, "package placed");
        self.resident[i] = Some(package);
        Ok(())
    }

    /// Remove the processed package from drop-off `id` and count it as
    /// delivered.
    pub fn remove_delivered(
        &mut self,
        id:    StationId,
        token: &ReservationToken<'_>,
        now:   SimTime,
    ) -> StationResult<Package> {
        self.expect_kind(id, StationKind::Dropoff)?;
        check_token(id, token)?;
        let i = id.index();
        let mut pkg = self.resident[i].take().ok_or(StationError::StationEmpty(id))?;
        self.last_removal[i] = Some(now);
        pkg.owner = Owner::None;
        self.delivered += 1;
        info!(
            station = %id,
            package = %pkg.id,
            latency = now.since(pkg.spawn_time),
            "package delivered"
        );
        Ok(pkg)
    }

    // ── Selection ─────────────────────────────────────────────────────────

    /// Undo a [`place`](Self::place): the package goes back to the token
    /// holder.  Nothing is counted as delivered.
    pub fn reclaim(&mut self, id: StationId, token: &ReservationToken<'_>) -> StationResult<Package> {
        self.expect_kind(id, StationKind::Dropoff)?;
        check_token(id, token)?;
        let mut pkg = self.resident[id.index()].take().ok_or(StationError::StationEmpty(id))?;
        pkg.owner = Owner::Vehicle(token.holder());
        pkg.placed_at = None;
        debug!(station = %id, package = %pkg.id, vehicle = %token.holder(), "placement undone");
        Ok(pkg)
    }

    /// The pickup whose resident package has waited longest.  Ties go to the
    /// lowest station index.
    pub fn oldest_waiting(&self) -> Option<StationId> {
        self.oldest_waiting_where(|_| true)
    }

    /// Like [`oldest_waiting`](Self::oldest_waiting), restricted to stations
    /// for which `eligible` returns `true` (e.g. not reserved by another
    /// vehicle).
    pub fn oldest_waiting_where<F>(&self, mut eligible: F) -> Option<StationId>
    where
        F: FnMut(StationId) -> bool,
    {
        let mut best: Option<(SimTime, StationId)> = None;
        for s in self.pickups() {
            let Some(pkg) = self.resident[s.id.index()].as_ref() else { continue };
            if !eligible(s.id) {
                continue;
            }
            // Strictly earlier spawn wins; equal spawn keeps the lower index
            // seen first.
            if best.is_none_or(|(t, _)| pkg.spawn_time < t) {
                best = Some((pkg.spawn_time, s.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// The empty drop-off nearest to `from` (ground-plane distance) for which
    /// `eligible` returns `true`.  Ties go to the lowest station index.
    pub fn nearest_free_dropoff<F>(&self, from: Vec3, mut eligible: F) -> Option<StationId>
    where
        F: FnMut(StationId) -> bool,
    {
        let mut best: Option<(f32, StationId)> = None;
        for s in self.dropoffs() {
            if self.resident[s.id.index()].is_some() || !eligible(s.id) {
                continue;
            }
            let d = planar_distance(from, s.position);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, s.id));
            }
        }
        best.map(|(_, id)| id)
    }

    // ── Counters ──────────────────────────────────────────────────────────

    pub fn spawned_count(&self) -> u64 {
        self.spawned
    }

    pub fn delivered_count(&self) -> u64 {
        self.delivered
    }

    /// Packages sitting at any station (waiting pickups plus drop-offs in
    /// processing).
    pub fn resident_count(&self) -> usize {
        self.resident.iter().filter(|p| p.is_some()).count()
    }

    /// Packages waiting at pickup stations only.
    pub fn waiting_count(&self) -> usize {
        self.pickups().filter(|s| self.has_package(s.id)).count()
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn expect_kind(&self, id: StationId, expected: StationKind) -> StationResult<()> {
        let s = self.station(id)?;
        if s.kind != expected {
            return Err(StationError::WrongKind { station: id, expected });
        }
        Ok(())
    }
}

fn check_token(id: StationId, token: &ReservationToken<'_>) -> StationResult<()> {
    if token.resource() != Resource::Station(id) {
        return Err(StationError::Unauthorized { station: id, holder: token.holder() });
    }
    Ok(())
}

