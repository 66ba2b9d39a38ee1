//! `SteeringController`: target + obstacles → next motion state.

use tracing::trace;

use wh_core::Vec2;
use wh_core::geo::{heading_of, heading_vector, lift, planar, right_of, shortest_turn, wrap_deg};
use wh_spatial::Obstacle;

use crate::{MotionState, SteeringParams};

/// Result of one steering step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub motion:    MotionState,
    /// Ground-plane distance left to the target after moving.
    pub remaining: f32,
    /// An obstacle blocked the path head-on and the lateral bias was used.
    pub stalemate: bool,
    /// An obstacle in the braking cone lowered the target speed.
    pub braking:   bool,
}

/// Stateless steering math; per-vehicle state lives in [`MotionState`].
///
/// Cheap to copy and `Sync`, so one controller can serve every vehicle,
/// including from parallel workers.
#[derive(Copy, Clone, Debug, Default)]
pub struct SteeringController {
    params: SteeringParams,
}

impl SteeringController {
    pub fn new(params: SteeringParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SteeringParams {
        &self.params
    }

    /// Advance `motion` by `dt` simulated seconds toward `target`.
    ///
    /// `obstacles` is what the lidar sees (usually
    /// `ObstacleField::nearby(pos, params.sense_radius(), Some(self))`);
    /// entries outside the relevant radii are ignored here.
    pub fn step(
        &self,
        motion:    &MotionState,
        target:    wh_core::Vec3,
        obstacles: &[Obstacle],
        dt:        f32,
    ) -> StepOutcome {
        let here = planar(motion.position);
        let to_target = planar(target) - here;
        if !(dt > 0.0 && dt.is_finite()) {
            return StepOutcome {
                motion:    *motion,
                remaining: to_target.length(),
                stalemate: false,
                braking:   false,
            };
        }

        // ① attraction + repulsion
        let facing = heading_vector(motion.heading_deg);
        let attraction = to_target.normalize_or_zero();
        let repulsion = self.repulsion(here, facing, obstacles);
        let mut combined = attraction + repulsion;
        let (mut target_speed, braking) = self.target_speed(here, facing, obstacles);

        // Stalemate: the combined vector collapsed, or an obstacle in the
        // braking cone sits square on the path with no sideways pull.
        let stalemate = attraction != Vec2::ZERO
            && (combined.length() < self.params.stalemate_epsilon
                || (braking
                    && repulsion != Vec2::ZERO
                    && attraction.perp_dot(combined).abs() < STALEMATE_SINE * combined.length()));
        if stalemate {
            combined += right_of(facing) * self.params.lateral_bias;
            trace!(x = here.x, z = here.y, "steering stalemate, biasing right");
        }

        // ② desired heading, falling back to the current one
        let desired = heading_of(combined).unwrap_or(motion.heading_deg);

        // ③ turn-rate clamp
        let max_turn = self.params.turn_rate_max_deg * dt;
        let error = shortest_turn(motion.heading_deg, desired);
        let turn = error.clamp(-max_turn, max_turn);
        let heading_deg = wrap_deg(motion.heading_deg + turn);

        // ④ speed ramp, slowing into the target; a desired heading behind the
        // vehicle means pivot in place, otherwise a target inside the turning
        // circle is orbited
        target_speed = target_speed.min(self.arrival_speed(to_target.length()));
        if error.abs() > PIVOT_ERROR_DEG {
            target_speed = 0.0;
        }
        let speed = ramp(motion.speed, target_speed, self.params.accel_max * dt, self.params.decel_max * dt);

        // ⑤ advance, never past the target
        let travel = (speed * dt).min(to_target.length());
        let delta = heading_vector(heading_deg) * travel;
        let position = motion.position + lift(delta, 0.0);

        StepOutcome {
            motion: MotionState { position, heading_deg, speed },
            remaining: (planar(target) - planar(position)).length(),
            stalemate,
            braking,
        }
    }

    /// Brake to a stop along the current heading, for a vehicle with nowhere
    /// to go.  Speed falls at `decel_max`; the vehicle covers `speed × dt`
    /// at the reduced speed, like [`step`](Self::step) does.
    pub fn coast(&self, motion: &MotionState, dt: f32) -> MotionState {
        if !(dt > 0.0 && dt.is_finite()) || motion.speed <= 0.0 {
            return *motion;
        }
        let speed = ramp(motion.speed, 0.0, 0.0, self.params.decel_max * dt);
        let delta = heading_vector(motion.heading_deg) * (speed * dt);
        MotionState {
            position: motion.position + lift(delta, 0.0),
            speed,
            ..*motion
        }
    }

    /// Speed cap while closing on the target: cruise, scaled by
    /// `remaining / braking_distance` once inside the braking distance.
    pub fn arrival_speed(&self, remaining: f32) -> f32 {
        let brake = self.params.braking_distance;
        if brake <= 0.0 {
            return self.params.cruise_speed;
        }
        self.params.cruise_speed * (remaining / brake).clamp(0.0, 1.0)
    }

    /// Sum of repulsion from obstacles ahead inside the detection radius.
    ///
    /// Each contributes `(self - obstacle).normalized() × weight`, with the
    /// weight falling linearly from 1 at distance 0 to 0 at the radius.
    pub fn repulsion(&self, here: Vec2, facing: Vec2, obstacles: &[Obstacle]) -> Vec2 {
        let radius = self.params.detection_radius;
        obstacles
            .iter()
            .map(|o| planar(o.position) - here)
            .filter(|rel| rel.dot(facing) > 0.0)
            .map(|rel| {
                let d = rel.length();
                if d >= radius {
                    return Vec2::ZERO;
                }
                (-rel).normalize_or_zero() * repulsion_weight(d, radius)
            })
            .fold(Vec2::ZERO, |acc, v| acc + v)
    }

    /// Cruise speed, scaled by `d / braking_distance` for the nearest
    /// obstacle inside the braking cone.  Returns `(speed, braking)`.
    pub fn target_speed(&self, here: Vec2, facing: Vec2, obstacles: &[Obstacle]) -> (f32, bool) {
        let cruise = self.params.cruise_speed;
        let brake = self.params.braking_distance;
        if brake <= 0.0 {
            return (cruise, false);
        }
        let cos_cone = self.params.braking_cone_deg.to_radians().cos();
        let nearest = obstacles
            .iter()
            .map(|o| planar(o.position) - here)
            .filter_map(|rel| {
                let d = rel.length();
                // Inside the cone: angle to facing ≤ half-angle.
                (d < brake && rel.dot(facing) > 0.0 && rel.dot(facing) >= cos_cone * d).then_some(d)
            })
            .fold(f32::INFINITY, f32::min);
        if nearest.is_finite() {
            (cruise * (nearest / brake).clamp(0.0, 1.0), true)
        } else {
            (cruise, false)
        }
    }
}

/// Sideways share of the combined vector, relative to the attraction, below
/// which an obstacle in the braking cone counts as blocking the path.
pub const STALEMATE_SINE: f32 = 0.05;

/// Heading error beyond which the vehicle stops and turns on the spot.
pub const PIVOT_ERROR_DEG: f32 = 90.0;

/// Linear falloff: 1 at distance 0, 0 at `radius` and beyond.
#[inline]
pub fn repulsion_weight(distance: f32, radius: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    ((radius - distance) / radius).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by at most `up` (speeding up) or `down`
/// (slowing down).
#[inline]
fn ramp(current: f32, target: f32, up: f32, down: f32) -> f32 {
    if target >= current {
        (current + up).min(target)
    } else {
        (current - down).max(target)
    }
}
