//! Initial floor layout: stations, static obstacles, and vehicle starts.

use wh_core::{SimRng, Vec3};

/// Where and facing which way a vehicle starts.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleStart {
    pub position:    Vec3,
    pub heading_deg: f32,
}

/// Everything the core needs to know about the floor at startup.
///
/// Supplied by the visualization layer, loaded from CSV with
/// [`load_floor_plan_csv`][crate::load_floor_plan_csv], or assembled in code.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorPlan {
    pub pickups:   Vec<Vec3>,
    pub dropoffs:  Vec<Vec3>,
    /// Shelves, pillars, and other fixed structures the lidar sees.
    pub obstacles: Vec<Vec3>,
    pub vehicles:  Vec<VehicleStart>,
}

impl FloorPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pickup(mut self, at: Vec3) -> Self {
        self.pickups.push(at);
        self
    }

    pub fn dropoff(mut self, at: Vec3) -> Self {
        self.dropoffs.push(at);
        self
    }

    pub fn obstacle(mut self, at: Vec3) -> Self {
        self.obstacles.push(at);
        self
    }

    pub fn vehicle(mut self, at: Vec3, heading_deg: f32) -> Self {
        self.vehicles.push(VehicleStart { position: at, heading_deg });
        self
    }

    /// Add `count` vehicles at seeded random positions inside the ground
    /// rectangle `min..max` (the `y` of `min` is used as the floor height),
    /// each with a random heading.
    pub fn scatter_vehicles(mut self, count: usize, min: Vec3, max: Vec3, rng: &mut SimRng) -> Self {
        for _ in 0..count {
            let x = if max.x > min.x { rng.gen_range(min.x..max.x) } else { min.x };
            let z = if max.z > min.z { rng.gen_range(min.z..max.z) } else { min.z };
            let heading_deg = rng.gen_range(-180.0f32..180.0);
            self.vehicles.push(VehicleStart { position: Vec3::new(x, min.y, z), heading_deg });
        }
        self
    }

    /// `true` if a delivery cycle is possible at all.
    pub fn is_operable(&self) -> bool {
        !self.pickups.is_empty() && !self.dropoffs.is_empty() && !self.vehicles.is_empty()
    }
}
