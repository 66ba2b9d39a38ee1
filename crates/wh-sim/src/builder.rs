//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use wh_core::{FleetConfig, SimTime, Vec3, VehicleId};
use wh_fleet::{CyclePolicy, Vehicle};
use wh_reserve::ReservationArbiter;
use wh_station::{FloorPlan, StationRegistry};
use wh_steer::{SteeringController, SteeringParams};

use crate::{FleetMetrics, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`FleetConfig`] — speeds, radii, waits, speed factor, …
/// - [`FloorPlan`] — station, obstacle, and vehicle start positions
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default |
/// |---------------------------|---------|
/// | `.snapshot_interval(n)`   | `1`     |
///
/// # Example
///
/// ```rust,ignore
/// let plan = FloorPlan::new()
///     .pickup(Vec3::new(0.0, 0.0, 20.0))
///     .dropoff(Vec3::new(0.0, 0.0, -20.0))
///     .vehicle(Vec3::ZERO, 0.0);
/// let mut sim = SimBuilder::new(FleetConfig::default(), plan).build()?;
/// sim.run(1_000, 1.0 / 30.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:            FleetConfig,
    plan:              FloorPlan,
    snapshot_interval: u64,
}

impl SimBuilder {
    pub fn new(config: FleetConfig, plan: FloorPlan) -> Self {
        Self { config, plan, snapshot_interval: 1 }
    }

    /// Call `SimObserver::on_snapshot` every `n` ticks (`0` disables it).
    pub fn snapshot_interval(mut self, n: u64) -> Self {
        self.snapshot_interval = n;
        self
    }

    /// Validate inputs, stock every pickup with its first package, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        validate_plan(&self.plan)?;

        let policy = CyclePolicy::from(&self.config);
        let vehicles: Vec<Vehicle> = self
            .plan
            .vehicles
            .iter()
            .enumerate()
            .map(|(i, start)| Vehicle::new(VehicleId(i as u32), start.position, start.heading_deg, policy))
            .collect();

        let mut registry = StationRegistry::from_plan(&self.plan);
        registry.spawn_due(SimTime::ZERO, self.config.dwell_threshold_secs);

        info!(
            vehicles = vehicles.len(),
            pickups = self.plan.pickups.len(),
            dropoffs = self.plan.dropoffs.len(),
            obstacles = self.plan.obstacles.len(),
            "simulation built"
        );

        Ok(Sim {
            clock:             self.config.make_clock(),
            controller:        SteeringController::new(SteeringParams::from(&self.config)),
            config:            self.config,
            registry,
            arbiter:           ReservationArbiter::new(),
            vehicles,
            statics:           self.plan.obstacles,
            metrics:           FleetMetrics::new(),
            snapshot_interval: self.snapshot_interval,
        })
    }
}

fn validate_plan(plan: &FloorPlan) -> SimResult<()> {
    if !plan.is_operable() {
        return Err(SimError::Layout(format!(
            "need at least one pickup, drop-off and vehicle (got {}, {}, {})",
            plan.pickups.len(),
            plan.dropoffs.len(),
            plan.vehicles.len()
        )));
    }
    let finite = |p: &Vec3| p.is_finite();
    let all_finite = plan.pickups.iter().all(finite)
        && plan.dropoffs.iter().all(finite)
        && plan.obstacles.iter().all(finite)
        && plan.vehicles.iter().all(|v| v.position.is_finite() && v.heading_deg.is_finite());
    if !all_finite {
        return Err(SimError::Layout("positions and headings must be finite".into()));
    }
    Ok(())
}
