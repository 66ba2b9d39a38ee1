//! Unit tests for wh-reserve.

use wh_core::{SegmentId, StationId, VehicleId};

use crate::{ReservationArbiter, ReserveError, Resource};

// ── Helpers ───────────────────────────────────────────────────────────────────

const A: VehicleId = VehicleId(0);
const B: VehicleId = VehicleId(1);

fn station(n: u32) -> Resource {
    Resource::Station(StationId(n))
}

// ── try_reserve / release ─────────────────────────────────────────────────────

#[cfg(test)]
mod exclusivity {
    use super::*;

    #[test]
    fn first_claimant_wins() {
        let mut arb = ReservationArbiter::new();
        assert!(arb.try_reserve(StationId(3), A));
        assert!(!arb.try_reserve(StationId(3), B));
        assert_eq!(arb.holder(StationId(3)), Some(A));
        assert_eq!(arb.granted_total(), 1);
    }

    #[test]
    fn losing_claim_has_no_side_effects() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(0), A);
        let order = arb.grant_order(station(0));
        assert!(!arb.try_reserve(station(0), B));
        assert_eq!(arb.grant_order(station(0)), order);
        assert_eq!(arb.live_count(), 1);
        assert!(arb.held_by(B).is_empty());
    }

    #[test]
    fn reserve_reports_winner() {
        let mut arb = ReservationArbiter::new();
        arb.reserve(station(1), A).unwrap();
        assert_eq!(
            arb.reserve(station(1), B),
            Err(ReserveError::ResourceUnavailable { resource: station(1), holder: A })
        );
    }

    #[test]
    fn reentrant_claim_does_not_regrant() {
        let mut arb = ReservationArbiter::new();
        assert!(arb.try_reserve(station(0), A));
        assert!(arb.try_reserve(station(0), A));
        assert_eq!(arb.granted_total(), 1);
        assert!(arb.is_available_to(station(0), A));
        assert!(!arb.is_available_to(station(0), B));
    }

    #[test]
    fn release_frees_for_next_vehicle() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(0), A);
        assert_eq!(arb.release(station(0)), Some(A));
        assert!(arb.is_free(station(0)));
        assert!(arb.try_reserve(station(0), B));
    }

    #[test]
    fn release_is_idempotent() {
        let mut arb = ReservationArbiter::new();
        assert_eq!(arb.release(station(9)), None);
        arb.try_reserve(station(0), A);
        arb.release(station(0));
        assert_eq!(arb.release(station(0)), None);
        assert_eq!(arb.released_total(), 1);
        assert_eq!(arb.live_count(), 0);
    }

    #[test]
    fn grant_order_is_monotonic() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(0), A);
        arb.try_reserve(station(1), B);
        arb.release(station(0));
        arb.try_reserve(station(0), B);
        let o1 = arb.grant_order(station(1)).unwrap();
        let o0 = arb.grant_order(station(0)).unwrap();
        assert!(o0 > o1);
    }

    #[test]
    fn segments_share_the_arbiter() {
        let mut arb = ReservationArbiter::new();
        let seg = Resource::Segment(SegmentId(4));
        assert!(arb.try_reserve(seg, A));
        assert!(!arb.try_reserve(SegmentId(4), B));
        // Segment 4 and station 4 are distinct resources.
        assert!(arb.try_reserve(StationId(4), B));
        assert_eq!(seg.station(), None);
        assert_eq!(Resource::from(StationId(4)).station(), Some(StationId(4)));
    }

    #[test]
    fn release_all_returns_grant_order() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(5), A);
        arb.try_reserve(SegmentId(1), A);
        arb.try_reserve(station(2), A);
        arb.try_reserve(station(7), B);
        let released = arb.release_all(A);
        assert_eq!(released, vec![station(5), Resource::Segment(SegmentId(1)), station(2)]);
        assert_eq!(arb.live_count(), 1);
        assert_eq!(arb.holder(station(7)), Some(B));
    }
}

// ── Tokens ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tokens {
    use super::*;

    #[test]
    fn holder_gets_token() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(0), A);
        let token = arb.authorize(station(0), A).unwrap();
        assert_eq!(token.resource(), station(0));
        assert_eq!(token.holder(), A);
        assert_eq!(Some(token.order()), arb.grant_order(station(0)));
    }

    #[test]
    fn non_holder_is_unauthorized() {
        let mut arb = ReservationArbiter::new();
        arb.try_reserve(station(0), A);
        assert_eq!(
            arb.authorize(station(0), B).unwrap_err(),
            ReserveError::Unauthorized { resource: station(0), holder: B }
        );
        assert!(arb.authorize(station(1), A).is_err());
    }
}

// ── SharedArbiter ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod shared {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::SharedArbiter;

    #[test]
    fn concurrent_claims_have_one_winner() {
        for _ in 0..20 {
            let shared = SharedArbiter::default();
            let barrier = Arc::new(Barrier::new(8));
            let handles: Vec<_> = (0..8u32)
                .map(|i| {
                    let shared = shared.clone();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        shared.try_reserve(StationId(0), VehicleId(i))
                    })
                })
                .collect();
            let wins = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&won| won)
                .count();
            assert_eq!(wins, 1);
            assert!(!shared.is_free(StationId(0)));
        }
    }

    #[test]
    fn release_through_handle() {
        let shared = SharedArbiter::new(ReservationArbiter::new());
        assert!(shared.try_reserve(station(2), A));
        assert_eq!(shared.holder(station(2)), Some(A));
        assert_eq!(shared.release(station(2)), Some(A));
        assert!(shared.is_free(station(2)));
    }
}
