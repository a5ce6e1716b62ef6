//! Locomotion control core for a four-legged robot.
//!
//! Converts motion intents (gait patterns, jump, backflip) into per-leg
//! coupled-pair position commands. The firmware is expected to invoke
//! [`Controller::tick`] at a fixed rate and to feed [`ipc::LIVE_PITCH`]
//! from its IMU task; serial transport and scheduling live outside this
//! crate behind [`actuator::CoupledActuator`].

#![no_std]

#[cfg(test)]
extern crate std;

pub mod actuator;
pub mod config;
pub mod control;
pub mod flip;
pub mod gait;
pub mod ipc;
pub mod jump;
pub mod kinematics;
pub mod maneuver;

pub use actuator::{CoupledActuator, LegGain, LegSet};
pub use control::Controller;
pub use gait::{GaitFault, GaitParams};
pub use ipc::{Event, PitchCell, LIVE_PITCH};
pub use maneuver::{Command, GaitPreset, ManeuverMode};
