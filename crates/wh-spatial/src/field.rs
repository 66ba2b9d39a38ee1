//! `ObstacleField` — an immutable proximity index over one tick's snapshot.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over ground-plane `[x, z]` points.  Height is
//! ignored: every vehicle and structure shares the floor.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wh_core::geo::planar;
use wh_core::{ObstacleId, Phase, Vec3, VehicleId};

use crate::{EntityRef, Obstacle};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: an `[x, z]` point and the slot of the
/// obstacle in `ObstacleField::obstacles`.
#[derive(Clone)]
struct Entry {
    point: [f32; 2],
    slot:  u32,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dz = self.point[1] - point[1];
        dx * dx + dz * dz
    }
}

// ── ObstacleField ─────────────────────────────────────────────────────────────

/// Read-only snapshot of everything on the floor for one tick.
///
/// Build with [`ObstacleFieldBuilder`].  There is no mutation API.
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    index:     RTree<Entry>,
}

impl ObstacleField {
    /// A field with nothing in it.
    pub fn empty() -> Self {
        ObstacleFieldBuilder::new().build()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// All entries in insertion order.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Every obstacle within `radius` (ground-plane distance, inclusive) of
    /// `position`, except `exclude`.
    ///
    /// Results are sorted by distance, then by entity, so callers that fold
    /// over them get the same floating-point result on every run.
    pub fn nearby(&self, position: Vec3, radius: f32, exclude: Option<EntityRef>) -> Vec<Obstacle> {
        if radius <= 0.0 || !radius.is_finite() {
            return Vec::new();
        }
        let p = planar(position);
        let query = [p.x, p.y];
        let mut hits: Vec<(f32, Obstacle)> = self
            .index
            .locate_within_distance(query, radius * radius)
            .map(|e| (e.distance_2(&query), self.obstacles[e.slot as usize]))
            .filter(|(_, o)| Some(o.entity) != exclude)
            .collect();
        hits.sort_by(|(da, a), (db, b)| da.total_cmp(db).then(a.entity.cmp(&b.entity)));
        hits.into_iter().map(|(_, o)| o).collect()
    }
}

// ── ObstacleFieldBuilder ──────────────────────────────────────────────────────

/// Collects entries, then bulk-loads the R-tree in [`build`](Self::build).
#[derive(Default)]
pub struct ObstacleFieldBuilder {
    obstacles: Vec<Obstacle>,
}

impl ObstacleFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { obstacles: Vec::with_capacity(n) }
    }

    pub fn add_vehicle(&mut self, id: VehicleId, position: Vec3, phase: Phase) -> &mut Self {
        self.obstacles.push(Obstacle {
            entity: EntityRef::Vehicle(id),
            position,
            phase: Some(phase),
        });
        self
    }

    pub fn add_static(&mut self, id: ObstacleId, position: Vec3) -> &mut Self {
        self.obstacles.push(Obstacle {
            entity: EntityRef::Static(id),
            position,
            phase: None,
        });
        self
    }

    /// Consume the builder.  O(N log N) bulk load.
    pub fn build(self) -> ObstacleField {
        let entries: Vec<Entry> = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let p = planar(o.position);
                Entry { point: [p.x, p.y], slot: i as u32 }
            })
            .collect();
        ObstacleField {
            obstacles: self.obstacles,
            index:     RTree::bulk_load(entries),
        }
    }
}
