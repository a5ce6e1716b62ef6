//! Actuator-pair interface
//! ===========================================================
//!
//! One leg is a pair of coupled motor axes behind a serial link. The
//! controller only ever speaks the theta/gamma convention to it: `theta` is
//! the symmetric hip-sweep command, `gamma` the differential leg-length
//! command. The transport itself (framing, retries, checksums) lives in the
//! firmware's driver layer, not here; commands are fire-and-forget and a
//! dispatch error is reported, never retried inside the control loop.

use crate::ipc::{self, Event};

/// Stiffness/damping for the two decoupled actuator axes. Selected per
/// maneuver phase, not computed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegGain {
    pub kp_theta: f32,
    pub kd_theta: f32,
    pub kp_gamma: f32,
    pub kd_gamma: f32,
}

impl LegGain {
    pub const fn new(kp_theta: f32, kd_theta: f32, kp_gamma: f32, kd_gamma: f32) -> Self {
        Self {
            kp_theta,
            kd_theta,
            kp_gamma,
            kd_gamma,
        }
    }
}

/// One leg's two-axis motor controller.
#[allow(async_fn_in_trait)]
pub trait CoupledActuator {
    type Error;

    /// Send a coupled position target with gains. Fire-and-forget; no reply
    /// is consumed by the control core.
    async fn set_coupled_position(
        &mut self,
        theta: f32,
        gamma: f32,
        gains: &LegGain,
    ) -> Result<(), Self::Error>;

    /// Raw single-axis position target. Diagnostic path, unused by the
    /// gait/jump/flip core.
    async fn set_position(&mut self, axis: u8, target: f32) -> Result<(), Self::Error>;

    /// Raw current command to both axes. Diagnostic path, unused by the
    /// gait/jump/flip core.
    async fn set_dual_current(&mut self, i0: f32, i1: f32) -> Result<(), Self::Error>;
}

/// Direction sign per leg: which side of the body the leg is mounted on,
/// mirroring the x axis. Legs 0 and 3 are the front pair, 1 and 2 the rear.
pub const LEG_DIRECTIONS: [f32; 4] = [-1.0, -1.0, 1.0, 1.0];

/// The four legs, indexed 0..=3.
pub struct LegSet<A: CoupledActuator> {
    legs: [A; 4],
}

impl<A: CoupledActuator> LegSet<A> {
    pub fn new(legs: [A; 4]) -> Self {
        Self { legs }
    }

    /// Dispatch one coupled-pair command to one leg. Failures are reported
    /// as a diagnostic event and otherwise dropped.
    pub async fn command(&mut self, leg: usize, theta: f32, gamma: f32, gains: &LegGain) {
        if self.legs[leg]
            .set_coupled_position(theta, gamma, gains)
            .await
            .is_err()
        {
            ipc::report(Event::DispatchFailed { leg: leg as u8 });
        }
    }

    pub fn get_mut(&mut self, leg: usize) -> &mut A {
        &mut self.legs[leg]
    }
}
