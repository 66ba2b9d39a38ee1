//! Unit tests for wh-spatial.

use wh_core::{ObstacleId, Phase, Vec3, VehicleId};

use crate::{EntityRef, ObstacleField, ObstacleFieldBuilder, ObstacleKind};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Vehicles 0..3 on the x axis at x = 0, 1, 5; one pillar at (0, 0, 2).
fn sample_field() -> ObstacleField {
    let mut b = ObstacleFieldBuilder::with_capacity(4);
    b.add_vehicle(VehicleId(0), Vec3::new(0.0, 0.0, 0.0), Phase::MoveToPickup)
        .add_vehicle(VehicleId(1), Vec3::new(1.0, 0.0, 0.0), Phase::Load)
        .add_vehicle(VehicleId(2), Vec3::new(5.0, 0.0, 0.0), Phase::Idle)
        .add_static(ObstacleId(0), Vec3::new(0.0, 0.0, 2.0));
    b.build()
}

#[cfg(test)]
mod nearby {
    use super::*;

    #[test]
    fn excludes_self_and_far_entities() {
        let field = sample_field();
        let hits = field.nearby(Vec3::ZERO, 2.5, Some(EntityRef::Vehicle(VehicleId(0))));
        let ids: Vec<EntityRef> = hits.iter().map(|o| o.entity).collect();
        assert_eq!(ids, vec![EntityRef::Vehicle(VehicleId(1)), EntityRef::Static(ObstacleId(0))]);
    }

    #[test]
    fn sorted_by_distance() {
        let field = sample_field();
        let hits = field.nearby(Vec3::new(4.0, 0.0, 0.0), 10.0, None);
        assert_eq!(hits[0].entity, EntityRef::Vehicle(VehicleId(2)));
        assert_eq!(hits[1].entity, EntityRef::Vehicle(VehicleId(1)));
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        let field = sample_field();
        let hits = field.nearby(Vec3::ZERO, 1.0, Some(EntityRef::Vehicle(VehicleId(0))));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn height_is_ignored() {
        let field = sample_field();
        let hits = field.nearby(Vec3::new(5.0, 30.0, 0.0), 0.1, None);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn reports_kind_and_phase() {
        let field = sample_field();
        let hits = field.nearby(Vec3::new(0.0, 0.0, 2.0), 0.5, None);
        assert_eq!(hits[0].kind(), ObstacleKind::Static);
        assert_eq!(hits[0].phase, None);
        let v = field.nearby(Vec3::new(1.0, 0.0, 0.0), 0.1, None);
        assert_eq!(v[0].kind(), ObstacleKind::Dynamic);
        assert_eq!(v[0].phase, Some(Phase::Load));
    }

    #[test]
    fn zero_radius_and_empty_field() {
        assert_eq!(sample_field().len(), 4);
        assert!(sample_field().nearby(Vec3::ZERO, 0.0, None).is_empty());
        let empty = ObstacleField::empty();
        assert!(empty.is_empty());
        assert!(empty.nearby(Vec3::ZERO, 100.0, None).is_empty());
    }
}
