//! depot — small end-to-end run of the warehouse fleet simulator.
//!
//! Six vehicles shuttle packages between four pickup stations along the
//! north wall and three drop-off stations along the south wall, weaving
//! around a row of pillars.  Halfway through, the speed factor is doubled
//! the way a UI slider would.
//!
//! ```text
//! depot [fleet_config.json] [floor_plan.csv]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wh_core::{FleetConfig, SimRng, SimTime, StationId, Tick, Vec3, VehicleId};
use wh_output::{CsvWriter, OutputWriter, SimOutputObserver};
use wh_sim::{FleetSummary, SimBuilder, SimObserver, StationView, VehicleView};
use wh_station::{FloorPlan, Package, load_floor_plan_csv, load_floor_plan_reader};

// ── Constants ─────────────────────────────────────────────────────────────────

const VEHICLE_COUNT:     usize = 6;
const FRAME_SECS:        f64   = 1.0 / 30.0; // 30 fps UI frame
const TOTAL_FRAMES:      u64   = 30 * 120;   // two real minutes
const SNAPSHOT_INTERVAL: u64   = 15;         // two snapshots per real second
const OUTPUT_DIR:        &str  = "output/depot";

// ── Floor plan CSV ────────────────────────────────────────────────────────────

// Vehicles are scattered at random inside the aisle after loading.
const DEPOT_CSV: &str = "\
kind,x,y,z,heading\n\
pickup,-9,0,12,\n\
pickup,-3,0,12,\n\
pickup,3,0,12,\n\
pickup,9,0,12,\n\
dropoff,-6,0,-12,\n\
dropoff,0,0,-12,\n\
dropoff,6,0,-12,\n\
obstacle,-6,0,0,\n\
obstacle,0,0,0,\n\
obstacle,6,0,0,\n\
";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    deliveries:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, deliveries: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &FleetSummary) {
        self.inner.on_tick_end(tick, summary);
    }

    fn on_snapshot(
        &mut self,
        tick:     Tick,
        now:      SimTime,
        vehicles: &[VehicleView],
        stations: &[StationView],
    ) {
        self.snapshot_rows += vehicles.len();
        self.inner.on_snapshot(tick, now, vehicles, stations);
    }

    fn on_delivery(&mut self, tick: Tick, vehicle: VehicleId, station: StationId, package: &Package) {
        self.deliveries += 1;
        self.inner.on_delivery(tick, vehicle, station, package);
    }

    fn on_sim_end(&mut self, final_tick: Tick, summary: &FleetSummary) {
        self.inner.on_sim_end(final_tick, summary);
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<FleetConfig> {
    let Some(path) = path else {
        return Ok(FleetConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading fleet config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing fleet config {}", path.display()))
}

fn load_plan(path: Option<&Path>, seed: u64) -> Result<FloorPlan> {
    if let Some(path) = path {
        return load_floor_plan_csv(path).with_context(|| format!("loading floor plan {}", path.display()));
    }
    let mut rng = SimRng::new(seed);
    let plan = load_floor_plan_reader(Cursor::new(DEPOT_CSV))?.scatter_vehicles(
        VEHICLE_COUNT,
        Vec3::new(-10.0, 0.0, -6.0),
        Vec3::new(10.0, 0.0, 6.0),
        &mut rng,
    );
    Ok(plan)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let plan_path = args.next();

    // 1. Config and floor plan.
    let config = load_config(config_path.as_deref())?;
    let plan = load_plan(plan_path.as_deref(), config.seed)?;
    println!("=== depot — warehouse fleet simulator ===");
    println!(
        "Pickups: {}  |  Drop-offs: {}  |  Vehicles: {}  |  Obstacles: {}",
        plan.pickups.len(),
        plan.dropoffs.len(),
        plan.vehicles.len(),
        plan.obstacles.len()
    );
    println!();

    // 2. Build sim.
    let mut sim = SimBuilder::new(config, plan).snapshot_interval(SNAPSHOT_INTERVAL).build()?;

    // 3. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    // 4. Run: first half at the configured factor, second half doubled.
    let t0 = Instant::now();
    let half = TOTAL_FRAMES / 2;
    sim.run_ticks(half, FRAME_SECS, &mut obs)?;
    let doubled = sim.clock.factor() * 2.0;
    sim.set_speed_factor(doubled);
    sim.run(TOTAL_FRAMES - half, FRAME_SECS, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let summary = sim.summary();
    info!(wall_secs = elapsed.as_secs_f64(), "simulation complete");
    println!("Simulated {:.1} s in {:.3} s wall time", summary.sim_time.secs(), elapsed.as_secs_f64());
    println!("  vehicle_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  deliveries.csv        : {} rows", obs.deliveries);
    println!(
        "  spawned {}  delivered {}  in flight {}  resident {} ({} waiting)",
        summary.spawned, summary.delivered, summary.in_flight, summary.resident, summary.waiting
    );
    println!(
        "  avg dwell {:.2} s  avg delivery {:.2} s  max wait {:.2} s",
        summary.avg_dwell_time, summary.avg_delivery_time, summary.max_wait_time
    );
    println!();

    // 6. Final vehicle table.
    println!("{:<8} {:<16} {:>7} {:>8}", "Vehicle", "Phase", "Cycles", "Cargo");
    println!("{}", "-".repeat(42));
    for v in sim.vehicle_views() {
        println!(
            "{:<8} {:<16} {:>7} {:>8}",
            v.id.0,
            v.phase.as_str(),
            v.cycles_completed,
            v.carrying.map_or_else(|| "-".to_owned(), |p| p.0.to_string()),
        );
    }

    Ok(())
}
