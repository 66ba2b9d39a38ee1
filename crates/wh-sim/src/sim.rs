//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use wh_core::{FleetConfig, ObstacleId, SimClock, SimTime, StationId, Tick, Vec3};
use wh_fleet::{CycleEvent, CycleView, CycleWorld, Vehicle};
use wh_reserve::ReservationArbiter;
use wh_spatial::{EntityRef, ObstacleField, ObstacleFieldBuilder};
use wh_station::StationRegistry;
use wh_steer::{MotionState, SteeringController};

use crate::view::station_views;
use crate::{FleetMetrics, FleetSummary, SimError, SimObserver, SimResult, StationView, VehicleView};

// ── Per-vehicle plan produced by the read-only phase ──────────────────────────

/// What one vehicle decided from the start-of-tick snapshot.  Building these
/// touches no shared state, so the phase may run in parallel.
#[derive(Copy, Clone, Debug)]
struct VehiclePlan {
    /// Next motion state: a steering step toward the travel target, or
    /// braking in place for a vehicle with no target.
    motion:    MotionState,
    /// Station a seeking vehicle will try to claim.
    candidate: Option<StationId>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The fleet simulation.
///
/// Each call to [`step`](Self::step) runs one frame:
///
/// 1. **Clock**: advance by the real frame time; the simulated delta is
///    `real_dt × speed_factor`.
/// 2. **Spawn**: pickups that have been empty for the dwell threshold get a
///    new package.
/// 3. **Snapshot**: build the [`ObstacleField`] from every vehicle's current
///    position plus the static obstacles.
/// 4. **Plan** (optionally parallel with the `parallel` feature): each
///    travelling vehicle computes its steering step against the snapshot,
///    every other vehicle brakes toward a standstill; each seeking vehicle
///    selects a candidate station.
/// 5. **Move**: motion steps are applied.
/// 6. **Coordinate** (sequential, ascending `VehicleId`): every machine
///    claims, arrives, transfers, and releases through the shared registry
///    and arbiter.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration.  Changing it after build has no effect except
    /// through [`set_speed_factor`](Self::set_speed_factor).
    pub config: FleetConfig,

    /// Two-timeline clock; the only source of `dt` and wait deadlines.
    pub clock: SimClock,

    /// Stations and every package resident at one.
    pub registry: StationRegistry,

    /// Single source of truth for who holds which station.
    pub arbiter: ReservationArbiter,

    /// Vehicles indexed by `VehicleId`.
    pub vehicles: Vec<Vehicle>,

    /// Static obstacle positions indexed by `ObstacleId`.
    pub statics: Vec<Vec3>,

    pub(crate) controller:        SteeringController,
    pub(crate) metrics:           FleetMetrics,
    pub(crate) snapshot_interval: u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run one frame covering `real_dt` seconds of real time.
    ///
    /// # Errors
    ///
    /// [`SimError::Coordination`] if a package transfer fails on the
    /// reservation-protected path.  The failing vehicle has already released
    /// its reservations; the rest of the tick is skipped.
    pub fn step<O: SimObserver>(&mut self, real_dt: f64, observer: &mut O) -> SimResult<()> {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);

        self.clock.advance(real_dt);
        let now = self.clock.sim_time();
        let dt = self.clock.last_sim_dt() as f32;

        self.registry.spawn_due(now, self.config.dwell_threshold_secs);

        let field = self.snapshot();
        let plans = self.plan(&field, dt);
        for (vehicle, plan) in self.vehicles.iter_mut().zip(&plans) {
            vehicle.motion = plan.motion;
        }
        self.coordinate(tick, now, &plans, observer)?;
        self.watch_starvation(now);

        let summary = self.summary();
        observer.on_tick_end(tick, &summary);
        if self.snapshot_interval > 0 && tick.0 % self.snapshot_interval == 0 {
            observer.on_snapshot(tick, now, &self.vehicle_views(), &self.station_views());
        }
        Ok(())
    }

    /// Run exactly `n` frames of `real_dt` each.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, real_dt: f64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(real_dt, observer)?;
        }
        Ok(())
    }

    /// [`run_ticks`](Self::run_ticks), then report the end of the run.
    pub fn run<O: SimObserver>(&mut self, n: u64, real_dt: f64, observer: &mut O) -> SimResult<()> {
        self.run_ticks(n, real_dt, observer)?;
        let summary = self.summary();
        info!(
            ticks = self.clock.current_tick.0,
            sim_time = summary.sim_time.secs(),
            delivered = summary.delivered,
            avg_delivery_time = summary.avg_delivery_time,
            "run finished"
        );
        observer.on_sim_end(self.clock.current_tick, &summary);
        Ok(())
    }

    /// Change the speed factor from the next tick on.  Waits already
    /// scheduled keep the factor they were scheduled with.
    pub fn set_speed_factor(&mut self, factor: f64) {
        self.clock.set_factor(factor);
        info!(requested = factor, applied = self.clock.factor(), "speed factor changed");
    }

    pub fn now(&self) -> SimTime {
        self.clock.sim_time()
    }

    pub fn metrics(&self) -> &FleetMetrics {
        &self.metrics
    }

    /// Current aggregate counters.
    pub fn summary(&self) -> FleetSummary {
        let now = self.clock.sim_time();
        let in_flight = self.vehicles.iter().filter(|v| v.carrying().is_some()).count();
        let max_wait_time = self
            .registry
            .pickups()
            .map(|s| self.registry.wait_time(s.id, now))
            .fold(0.0, f64::max);
        FleetSummary {
            sim_time:          now,
            spawned:           self.registry.spawned_count(),
            delivered:         self.registry.delivered_count(),
            in_flight:         in_flight as u64,
            resident:          self.registry.resident_count() as u64,
            waiting:           self.registry.waiting_count() as u64,
            max_wait_time,
            avg_dwell_time:    self.metrics.avg_dwell_time(),
            avg_delivery_time: self.metrics.avg_delivery_time(),
        }
    }

    pub fn vehicle_views(&self) -> Vec<VehicleView> {
        let now = self.clock.sim_time();
        self.vehicles.iter().map(|v| VehicleView::of(v, now)).collect()
    }

    pub fn station_views(&self) -> Vec<StationView> {
        station_views(&self.registry, &self.arbiter, self.clock.sim_time())
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    fn snapshot(&self) -> ObstacleField {
        let mut builder = ObstacleFieldBuilder::with_capacity(self.vehicles.len() + self.statics.len());
        for v in &self.vehicles {
            builder.add_vehicle(v.id(), v.motion.position, v.phase());
        }
        for (i, &p) in self.statics.iter().enumerate() {
            builder.add_static(ObstacleId(i as u32), p);
        }
        builder.build()
    }

    /// Read-only phase: steering or braking for every vehicle, station selection
    /// for seeking ones.  With the `parallel` feature this runs on Rayon's
    /// pool; the result is in `VehicleId` order either way.
    fn plan(&self, field: &ObstacleField, dt: f32) -> Vec<VehiclePlan> {
        let view = CycleView::new(&self.registry, &self.arbiter, &self.clock);
        let controller = &self.controller;

        #[cfg(not(feature = "parallel"))]
        {
            self.vehicles
                .iter()
                .map(|v| plan_vehicle(v, &view, field, controller, dt))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.vehicles
                .par_iter()
                .map(|v| plan_vehicle(v, &view, field, controller, dt))
                .collect()
        }
    }

    /// Sequential write phase.  Vehicles advance in ascending `VehicleId`
    /// order, so when two picked the same candidate the lower ID wins.
    fn coordinate<O: SimObserver>(
        &mut self,
        tick:     Tick,
        now:      SimTime,
        plans:    &[VehiclePlan],
        observer: &mut O,
    ) -> SimResult<()> {
        for (vehicle, plan) in self.vehicles.iter_mut().zip(plans) {
            let id = vehicle.id();
            let mut world = CycleWorld::new(&mut self.registry, &mut self.arbiter, &self.clock);
            let events = vehicle
                .cycle
                .advance(vehicle.motion.position, plan.candidate, &mut world)
                .map_err(|source| SimError::Coordination { vehicle: id, source })?;

            for event in &events {
                self.metrics.record(event, now);
                if let CycleEvent::Delivered { station, package } = event {
                    observer.on_delivery(tick, id, *station, package);
                }
            }
        }
        Ok(())
    }

    fn watch_starvation(&mut self, now: SimTime) {
        let threshold = self.config.starvation_warn_secs;
        for vehicle in &mut self.vehicles {
            if vehicle.cycle.check_starvation(now, threshold) {
                warn!(
                    vehicle = %vehicle.id(),
                    phase = %vehicle.phase(),
                    idle_secs = vehicle.cycle.time_since_last_delivery(now),
                    "vehicle has not delivered recently"
                );
            }
        }
    }
}

fn plan_vehicle(
    vehicle:    &Vehicle,
    view:       &CycleView<'_>,
    field:      &ObstacleField,
    controller: &SteeringController,
    dt:         f32,
) -> VehiclePlan {
    let state = vehicle.cycle.state();
    let position = vehicle.motion.position;

    let motion = match state.travel_target().and_then(|station| view.registry.station(station).ok()) {
        Some(station) => {
            let radius = controller.params().sense_radius();
            let seen = field.nearby(position, radius, Some(EntityRef::Vehicle(vehicle.id())));
            let outcome = controller.step(&vehicle.motion, station.position, &seen, dt);
            if outcome.stalemate {
                debug!(vehicle = %vehicle.id(), "steering stalemate broken with lateral bias");
            }
            outcome.motion
        }
        None => controller.coast(&vehicle.motion, dt),
    };

    let candidate = if state.is_seeking() { vehicle.cycle.select(position, view) } else { None };

    VehiclePlan { motion, candidate }
}
