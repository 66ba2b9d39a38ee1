//! Unit tests for wh-core primitives.

#[cfg(test)]
mod ids {
    use crate::{PackageId, StationId, VehicleId};

    #[test]
    fn index_roundtrip() {
        let id = VehicleId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VehicleId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(StationId::default(), StationId::INVALID);
        assert_ne!(StationId(0), StationId::INVALID);
        assert_eq!(PackageId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(VehicleId(7).to_string(), "VehicleId(7)");
    }
}

#[cfg(test)]
mod geo {
    use glam::{Vec2, Vec3};

    use crate::geo::{heading_of, heading_vector, planar_distance, right_of, shortest_turn, wrap_deg};

    #[test]
    fn heading_axes() {
        assert!((heading_of(Vec2::new(0.0, 1.0)).unwrap() - 0.0).abs() < 1e-4);
        assert!((heading_of(Vec2::new(1.0, 0.0)).unwrap() - 90.0).abs() < 1e-4);
        assert!((heading_of(Vec2::new(-1.0, 0.0)).unwrap() + 90.0).abs() < 1e-4);
        // 180 wraps to -180
        assert!((heading_of(Vec2::new(0.0, -1.0)).unwrap().abs() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn heading_vector_inverts_heading_of() {
        for h in [-170.0f32, -45.0, 0.0, 30.0, 135.0] {
            let back = heading_of(heading_vector(h)).unwrap();
            assert!(shortest_turn(h, back).abs() < 1e-3, "{h} -> {back}");
        }
    }

    #[test]
    fn zero_vector_is_degenerate() {
        let err = heading_of(Vec2::ZERO).unwrap_err();
        assert_eq!(err.x, 0.0);
        assert!(heading_of(Vec2::new(f32::NAN, 1.0)).is_err());
    }

    #[test]
    fn wrap_and_shortest_turn() {
        assert_eq!(wrap_deg(190.0), -170.0);
        assert_eq!(wrap_deg(-190.0), 170.0);
        assert_eq!(wrap_deg(360.0), 0.0);
        assert_eq!(shortest_turn(170.0, -170.0), 20.0);
        assert_eq!(shortest_turn(-170.0, 170.0), -20.0);
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 10.0, 4.0);
        assert!((planar_distance(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn right_is_clockwise() {
        let r = right_of(Vec2::new(0.0, 1.0));
        assert!((heading_of(r).unwrap() - 90.0).abs() < 1e-4);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimTime, Tick};

    #[test]
    fn advance_accumulates_scaled_time() {
        let mut clock = SimClock::new(2.0, 0.1, 10.0);
        assert_eq!(clock.advance(0.5), SimTime(1.0));
        assert_eq!(clock.advance(0.25), SimTime(1.5));
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.real_elapsed() - 0.75).abs() < 1e-12);
        assert!((clock.last_sim_dt() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn negative_dt_keeps_clock_monotonic() {
        let mut clock = SimClock::default();
        clock.advance(1.0);
        let t = clock.advance(-5.0);
        assert_eq!(t, SimTime(1.0));
        assert_eq!(clock.advance(f64::NAN), SimTime(1.0));
    }

    #[test]
    fn set_factor_clamps() {
        let mut clock = SimClock::new(1.0, 0.1, 10.0);
        clock.set_factor(50.0);
        assert_eq!(clock.factor(), 10.0);
        clock.set_factor(0.0);
        assert_eq!(clock.factor(), 0.1);
        clock.set_factor(f64::INFINITY);
        assert_eq!(clock.factor(), 0.1);
    }

    #[test]
    fn malformed_bounds_fall_back_to_defaults() {
        let inverted = SimClock::new(3.0, 5.0, 1.0);
        assert_eq!(inverted.factor(), 3.0);
        let nan = SimClock::new(50.0, f64::NAN, 10.0);
        assert_eq!(nan.factor(), 10.0);
        let mut zero = SimClock::new(1.0, 0.0, 2.0);
        zero.set_factor(0.0);
        assert_eq!(zero.factor(), 0.1);
    }

    #[test]
    fn non_finite_initial_factor_stays_in_bounds() {
        assert_eq!(SimClock::new(f64::NAN, 2.0, 5.0).factor(), 2.0);
    }

    #[test]
    fn scaled_divides_by_factor() {
        let clock = SimClock::new(4.0, 0.1, 10.0);
        assert_eq!(clock.scaled(2.0), 0.5);
    }

    #[test]
    fn scheduled_wait_is_not_rescaled() {
        // 1 s nominal wait at factor 1.0, then factor jumps to 5.0.
        let mut clock = SimClock::new(1.0, 0.1, 10.0);
        let deadline = clock.schedule(1.0);
        clock.set_factor(5.0);
        for _ in 0..9 {
            clock.advance(0.1);
        }
        assert!(!clock.is_due(deadline), "wait was shortened retroactively");
        clock.advance(0.1000001);
        assert!(clock.is_due(deadline));
        // A wait scheduled now uses the new factor.
        let fast = clock.schedule(1.0);
        clock.advance(0.2000001);
        assert!(clock.is_due(fast));
    }

    #[test]
    fn sim_time_since_clamps() {
        assert_eq!(SimTime(5.0).since(SimTime(2.0)), 3.0);
        assert_eq!(SimTime(1.0).since(SimTime(2.0)), 0.0);
    }
}

#[cfg(test)]
mod config {
    use crate::FleetConfig;

    #[test]
    fn default_is_valid() {
        FleetConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_non_positive_speed() {
        let cfg = FleetConfig { cruise_speed: 0.0, ..FleetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_factor_bounds() {
        let cfg = FleetConfig {
            min_speed_factor: 5.0,
            max_speed_factor: 1.0,
            ..FleetConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_infinite_braking_distance() {
        let cfg = FleetConfig { braking_distance: f32::INFINITY, ..FleetConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = FleetConfig { lateral_bias: f32::NAN, ..FleetConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn make_clock_clamps_initial_factor() {
        let cfg = FleetConfig { speed_factor: 100.0, ..FleetConfig::default() };
        assert_eq!(cfg.make_clock().factor(), 10.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a = r1.gen_range(0.0f32..1.0);
            let b = r2.gen_range(0.0f32..1.0);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(-2.0f32..2.0);
            assert!((-2.0..2.0).contains(&v));
        }
    }
}

#[cfg(test)]
mod phase {
    use crate::Phase;

    #[test]
    fn display() {
        assert_eq!(Phase::MoveToPickup.to_string(), "to-pickup");
        assert_eq!(Phase::default(), Phase::Idle);
    }
}
