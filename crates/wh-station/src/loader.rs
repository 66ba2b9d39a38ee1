//! CSV floor-plan loader.
//!
//! # CSV format
//!
//! One row per placed item.  `heading` is optional and only meaningful for
//! vehicles (degrees, default 0).
//!
//! ```csv
//! kind,x,y,z,heading
//! pickup,0,0,10,
//! pickup,4,0,10,
//! dropoff,0,0,-10,
//! obstacle,2,0,0,
//! vehicle,-3,0,0,90
//! ```
//!
//! | `kind`     | Goes to                  |
//! |------------|--------------------------|
//! | `pickup`   | `FloorPlan::pickups`     |
//! | `dropoff`  | `FloorPlan::dropoffs`    |
//! | `obstacle` | `FloorPlan::obstacles`   |
//! | `vehicle`  | `FloorPlan::vehicles`    |
//!
//! Row order within a kind fixes the IDs assigned later.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use wh_core::Vec3;

use crate::{FloorPlan, StationError, VehicleStart};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FloorPlanRecord {
    kind:    String,
    x:       f32,
    y:       f32,
    z:       f32,
    #[serde(default)]
    heading: Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`FloorPlan`] from a CSV file.
pub fn load_floor_plan_csv(path: &Path) -> Result<FloorPlan, StationError> {
    let file = std::fs::File::open(path).map_err(StationError::Io)?;
    load_floor_plan_reader(file)
}

/// Like [`load_floor_plan_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded layouts.
pub fn load_floor_plan_reader<R: Read>(reader: R) -> Result<FloorPlan, StationError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut plan = FloorPlan::new();

    for (line, result) in csv_reader.deserialize::<FloorPlanRecord>().enumerate() {
        let row = result.map_err(|e| StationError::Parse(e.to_string()))?;
        let at = Vec3::new(row.x, row.y, row.z);
        if !at.is_finite() {
            return Err(StationError::Parse(format!("row {}: non-finite position", line + 1)));
        }
        match row.kind.to_ascii_lowercase().as_str() {
            "pickup" => plan.pickups.push(at),
            "dropoff" => plan.dropoffs.push(at),
            "obstacle" => plan.obstacles.push(at),
            "vehicle" => plan.vehicles.push(VehicleStart {
                position:    at,
                heading_deg: row.heading.unwrap_or(0.0),
            }),
            other => {
                return Err(StationError::Parse(format!(
                    "row {}: invalid kind {other:?}: expected pickup, dropoff, obstacle, or vehicle",
                    line + 1
                )));
            }
        }
    }

    Ok(plan)
}
