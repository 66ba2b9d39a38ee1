//! Unit tests for wh-station.

use wh_core::{SimTime, StationId, Vec3, VehicleId};
use wh_reserve::ReservationArbiter;

use crate::{FloorPlan, Owner, StationError, StationKind, StationRegistry};

// ── Helpers ───────────────────────────────────────────────────────────────────

const V0: VehicleId = VehicleId(0);
const V1: VehicleId = VehicleId(1);

/// Three pickups along z = 10 and two drop-offs along z = -10.
/// Pickups get IDs 0..3, drop-offs 3..5.
fn floor() -> StationRegistry {
    let plan = FloorPlan::new()
        .pickup(Vec3::new(0.0, 0.0, 10.0))
        .pickup(Vec3::new(4.0, 0.0, 10.0))
        .pickup(Vec3::new(8.0, 0.0, 10.0))
        .dropoff(Vec3::new(0.0, 0.0, -10.0))
        .dropoff(Vec3::new(8.0, 0.0, -10.0));
    StationRegistry::from_plan(&plan)
}

fn t(secs: f64) -> SimTime {
    SimTime(secs)
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn pickups_then_dropoffs() {
        let reg = floor();
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.pickups().count(), 3);
        assert_eq!(reg.dropoffs().map(|s| s.id).collect::<Vec<_>>(), vec![StationId(3), StationId(4)]);
        assert_eq!(reg.station(StationId(3)).unwrap().kind, StationKind::Dropoff);
    }

    #[test]
    fn unknown_station_errors() {
        let reg = floor();
        assert!(matches!(reg.station(StationId(99)), Err(StationError::UnknownStation(_))));
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawning {
    use super::*;

    #[test]
    fn fresh_pickup_spawns_at_start() {
        let mut reg = floor();
        let pkg = reg.spawn_if_due(StationId(0), t(0.0), 10.0).unwrap();
        assert!(pkg.is_some());
        assert_eq!(reg.resident(StationId(0)).unwrap().spawn_time, t(0.0));
        assert_eq!(reg.resident(StationId(0)).unwrap().owner, Owner::Station(StationId(0)));
        assert_eq!(reg.last_removal(StationId(0)), None);
    }

    #[test]
    fn zero_threshold_spawns_immediately() {
        let mut reg = floor();
        assert!(reg.spawn_if_due(StationId(1), t(0.0), 0.0).unwrap().is_some());
    }

    #[test]
    fn spawn_is_idempotent() {
        let mut reg = floor();
        let first = reg.spawn_if_due(StationId(0), t(0.0), 0.0).unwrap();
        let second = reg.spawn_if_due(StationId(0), t(50.0), 0.0).unwrap();
        assert!(first.is_some());
        assert_eq!(second, None);
        assert_eq!(reg.spawned_count(), 1);
        assert_eq!(reg.resident(StationId(0)).unwrap().spawn_time, t(0.0));
    }

    #[test]
    fn dropoffs_never_spawn() {
        let mut reg = floor();
        assert!(matches!(
            reg.spawn_if_due(StationId(3), t(100.0), 0.0),
            Err(StationError::WrongKind { expected: StationKind::Pickup, .. })
        ));
    }

    #[test]
    fn spawn_due_covers_all_pickups() {
        let mut reg = floor();
        let spawned = reg.spawn_due(t(0.0), 0.0);
        assert_eq!(spawned.len(), 3);
        assert_eq!(reg.waiting_count(), 3);
        assert!(reg.spawn_due(t(1.0), 0.0).is_empty());
    }

    #[test]
    fn respawn_waits_for_dwell_after_take() {
        // Package at t=0, taken at t=13.3, threshold 10 s.
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_if_due(StationId(0), t(0.0), 0.0).unwrap();
        arb.try_reserve(StationId(0), V0);
        let token = arb.authorize(StationId(0), V0).unwrap();
        reg.take(StationId(0), &token, t(13.3)).unwrap();

        assert_eq!(reg.spawn_if_due(StationId(0), t(23.2), 10.0).unwrap(), None);
        assert!(reg.spawn_if_due(StationId(0), t(23.4), 10.0).unwrap().is_some());
    }
}

// ── Transfers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transfers {
    use super::*;

    #[test]
    fn take_requires_matching_token() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);
        arb.try_reserve(StationId(1), V0);
        let token = arb.authorize(StationId(1), V0).unwrap();
        let err = reg.take(StationId(0), &token, t(1.0)).unwrap_err();
        assert!(matches!(err, StationError::Unauthorized { station: StationId(0), holder: V0 }));
        assert!(reg.has_package(StationId(0)));
    }

    #[test]
    fn take_moves_ownership_to_vehicle() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);
        arb.try_reserve(StationId(2), V1);
        let token = arb.authorize(StationId(2), V1).unwrap();
        let pkg = reg.take(StationId(2), &token, t(4.0)).unwrap();
        assert_eq!(pkg.owner, Owner::Vehicle(V1));
        assert_eq!(pkg.picked_up_at, Some(t(4.0)));
        assert_eq!(pkg.wait_time(t(100.0)), 4.0);
        assert!(!reg.has_package(StationId(2)));
        assert_eq!(reg.last_removal(StationId(2)), Some(t(4.0)));
    }

    #[test]
    fn take_from_empty_station() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(StationId(0), V0);
        let token = arb.authorize(StationId(0), V0).unwrap();
        assert!(matches!(
            reg.take(StationId(0), &token, t(0.0)),
            Err(StationError::StationEmpty(StationId(0)))
        ));
    }

    #[test]
    fn place_then_remove_counts_delivery() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);

        arb.try_reserve(StationId(0), V0);
        let pkg = {
            let token = arb.authorize(StationId(0), V0).unwrap();
            reg.take(StationId(0), &token, t(2.0)).unwrap()
        };
        arb.release(StationId(0));

        arb.try_reserve(StationId(3), V0);
        let token = arb.authorize(StationId(3), V0).unwrap();
        reg.place(StationId(3), pkg, &token, t(8.0)).unwrap();
        assert_eq!(reg.resident(StationId(3)).unwrap().placed_at, Some(t(8.0)));
        assert_eq!(reg.resident_count(), 3);

        let done = reg.remove_delivered(StationId(3), &token, t(10.0)).unwrap();
        assert_eq!(done.owner, Owner::None);
        assert_eq!(reg.delivered_count(), 1);
        assert_eq!(reg.resident_count(), 2);
    }

    #[test]
    fn reclaim_undoes_placement() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);

        arb.try_reserve(StationId(0), V0);
        let pkg = {
            let token = arb.authorize(StationId(0), V0).unwrap();
            reg.take(StationId(0), &token, t(2.0)).unwrap()
        };
        let id = pkg.id;

        arb.try_reserve(StationId(3), V0);
        let token = arb.authorize(StationId(3), V0).unwrap();
        reg.place(StationId(3), pkg, &token, t(8.0)).unwrap();
        let back = reg.reclaim(StationId(3), &token).unwrap();
        assert_eq!(back.id, id);
        assert_eq!(back.owner, Owner::Vehicle(V0));
        assert_eq!(back.placed_at, None);
        assert!(!reg.has_package(StationId(3)));
        assert_eq!(reg.delivered_count(), 0);
        assert!(matches!(reg.reclaim(StationId(3), &token), Err(StationError::StationEmpty(_))));
    }

    #[test]
    fn place_on_occupied_dropoff() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);
        let mut taken = Vec::new();
        for s in [0u32, 1] {
            arb.try_reserve(StationId(s), V0);
            let token = arb.authorize(StationId(s), V0).unwrap();
            taken.push(reg.take(StationId(s), &token, t(1.0)).unwrap());
        }
        arb.try_reserve(StationId(4), V0);
        let token = arb.authorize(StationId(4), V0).unwrap();
        let second = taken.pop().unwrap();
        reg.place(StationId(4), taken.pop().unwrap(), &token, t(2.0)).unwrap();
        assert!(matches!(
            reg.place(StationId(4), second, &token, t(2.0)),
            Err(StationError::StationOccupied(StationId(4)))
        ));
    }

    #[test]
    fn place_on_pickup_is_wrong_kind() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);
        arb.try_reserve(StationId(0), V0);
        let token = arb.authorize(StationId(0), V0).unwrap();
        let pkg = reg.take(StationId(0), &token, t(1.0)).unwrap();
        assert!(matches!(
            reg.place(StationId(0), pkg, &token, t(1.0)),
            Err(StationError::WrongKind { expected: StationKind::Dropoff, .. })
        ));
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selection {
    use super::*;

    #[test]
    fn oldest_first() {
        let mut reg = floor();
        reg.spawn_if_due(StationId(2), t(1.0), 0.0).unwrap();
        reg.spawn_if_due(StationId(0), t(5.0), 0.0).unwrap();
        reg.spawn_if_due(StationId(1), t(3.0), 0.0).unwrap();
        assert_eq!(reg.oldest_waiting(), Some(StationId(2)));
    }

    #[test]
    fn ties_break_on_lowest_index() {
        let mut reg = floor();
        reg.spawn_if_due(StationId(2), t(0.0), 0.0).unwrap();
        reg.spawn_if_due(StationId(1), t(0.0), 0.0).unwrap();
        assert_eq!(reg.oldest_waiting(), Some(StationId(1)));
    }

    #[test]
    fn empty_floor_has_no_candidate() {
        let reg = floor();
        assert_eq!(reg.oldest_waiting(), None);
    }

    #[test]
    fn filter_skips_reserved() {
        let mut reg = floor();
        let mut arb = ReservationArbiter::new();
        reg.spawn_due(t(0.0), 0.0);
        arb.try_reserve(StationId(0), V1);
        let pick = reg.oldest_waiting_where(|s| arb.is_available_to(s, V0));
        assert_eq!(pick, Some(StationId(1)));
        // The holder itself still sees its own station.
        assert_eq!(reg.oldest_waiting_where(|s| arb.is_available_to(s, V1)), Some(StationId(0)));
    }

    #[test]
    fn nearest_free_dropoff_by_distance() {
        let reg = floor();
        let near_right = Vec3::new(7.0, 0.0, -5.0);
        assert_eq!(reg.nearest_free_dropoff(near_right, |_| true), Some(StationId(4)));
        assert_eq!(reg.nearest_free_dropoff(near_right, |s| s != StationId(4)), Some(StationId(3)));
        assert_eq!(reg.nearest_free_dropoff(near_right, |_| false), None);
    }

    #[test]
    fn wait_time_tracks_resident() {
        let mut reg = floor();
        reg.spawn_if_due(StationId(0), t(2.0), 0.0).unwrap();
        assert_eq!(reg.wait_time(StationId(0), t(7.0)), 5.0);
        assert_eq!(reg.wait_time(StationId(1), t(7.0)), 0.0);
    }
}

// ── Floor plans ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod floor_plan {
    use std::io::Cursor;

    use wh_core::SimRng;

    use super::*;
    use crate::load_floor_plan_reader;

    const PLAN_CSV: &str = "\
kind,x,y,z,heading\n\
pickup,0,0,10,\n\
pickup,4,0,10,\n\
dropoff,0,0,-10,\n\
obstacle,2,0,0,\n\
vehicle,-3,0,0,90\n\
VEHICLE,3,0,0,\n\
";

    #[test]
    fn loads_all_kinds() {
        let plan = load_floor_plan_reader(Cursor::new(PLAN_CSV)).unwrap();
        assert_eq!(plan.pickups.len(), 2);
        assert_eq!(plan.dropoffs, vec![Vec3::new(0.0, 0.0, -10.0)]);
        assert_eq!(plan.obstacles.len(), 1);
        assert_eq!(plan.vehicles.len(), 2);
        assert_eq!(plan.vehicles[0].heading_deg, 90.0);
        assert_eq!(plan.vehicles[1].heading_deg, 0.0);
        assert!(plan.is_operable());
    }

    #[test]
    fn bad_kind_is_parse_error() {
        let csv = "kind,x,y,z,heading\nforklift,0,0,0,\n";
        assert!(matches!(
            load_floor_plan_reader(Cursor::new(csv)),
            Err(StationError::Parse(_))
        ));
    }

    #[test]
    fn bad_number_is_parse_error() {
        let csv = "kind,x,y,z,heading\npickup,abc,0,0,\n";
        assert!(load_floor_plan_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn scatter_is_seeded_and_bounded() {
        let min = Vec3::new(-5.0, 0.0, -5.0);
        let max = Vec3::new(5.0, 0.0, 5.0);
        let a = FloorPlan::new().scatter_vehicles(10, min, max, &mut SimRng::new(7));
        let b = FloorPlan::new().scatter_vehicles(10, min, max, &mut SimRng::new(7));
        assert_eq!(a, b);
        for v in &a.vehicles {
            assert!((-5.0..5.0).contains(&v.position.x));
            assert!((-5.0..5.0).contains(&v.position.z));
            assert_eq!(v.position.y, 0.0);
        }
    }
}
