//! A vehicle: where it is plus where it is in its cycle.

use wh_core::{Phase, Vec3, VehicleId};
use wh_station::Package;
use wh_steer::MotionState;

use crate::{CyclePolicy, DeliveryCycleMachine};

#[derive(Clone, Debug)]
pub struct Vehicle {
    pub motion: MotionState,
    pub cycle:  DeliveryCycleMachine,
}

impl Vehicle {
    /// A vehicle at rest at `position`, starting its cycle in `Idle`.
    pub fn new(id: VehicleId, position: Vec3, heading_deg: f32, policy: CyclePolicy) -> Self {
        Self {
            motion: MotionState::at_rest(position, heading_deg),
            cycle:  DeliveryCycleMachine::new(id, policy),
        }
    }

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.cycle.vehicle()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.motion.position
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    pub fn carrying(&self) -> Option<&Package> {
        self.cycle.cargo()
    }
}
