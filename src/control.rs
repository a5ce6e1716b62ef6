//! Per-tick control step and the maneuver state machine driver.
//!
//! The firmware invokes [`Controller::tick`] at a fixed rate (100 Hz). A
//! tick runs to completion: drain pending maneuver commands, snapshot the
//! live pitch, evaluate the active generator and dispatch one coupled-pair
//! command per leg. Nothing here blocks, retries or aborts the loop; the
//! worst case for a tick is "no command this time".

use embassy_time::Instant;

use crate::actuator::{CoupledActuator, LegSet, LEG_DIRECTIONS};
use crate::config::FLIP_WATCHDOG_S;
use crate::flip;
use crate::gait;
use crate::ipc::{self, Event, PitchCell};
use crate::jump::{self, JumpCommand};
use crate::kinematics::{cartesian_to_theta_gamma, CartesianPoint};
use crate::maneuver::{Command, GaitPreset, Maneuver, ManeuverMode};

fn elapsed_secs(now: Instant, started: Instant) -> f32 {
    now.checked_duration_since(started)
        .map_or(0.0, |d| d.as_micros() as f32 / 1_000_000.0)
}

/// Owns the maneuver state machine and the currently armed walk preset.
/// All state lives here; the only cross-task inputs are the pitch cell and
/// the command channel.
pub struct Controller {
    maneuver: Maneuver,
    walk: Option<GaitPreset>,
}

impl Controller {
    pub const fn new() -> Self {
        Self {
            maneuver: Maneuver::Walk,
            walk: None,
        }
    }

    pub fn mode(&self) -> ManeuverMode {
        self.maneuver.mode()
    }

    /// Arm a walk preset and return to WALK. The preset persists across a
    /// jump, so the gait resumes when the jump completes.
    pub fn select_gait(&mut self, preset: GaitPreset) {
        self.walk = Some(preset);
        self.maneuver = Maneuver::Walk;
        ipc::report(Event::GaitSelected);
    }

    /// Start (or restart) a jump. Re-triggering while already jumping just
    /// resets the clock.
    pub fn trigger_jump(&mut self, now: Instant) {
        self.maneuver = Maneuver::Jump { started: now };
        ipc::report(Event::JumpStarted);
    }

    /// Start (or restart) a backflip. Tares the pitch reference so the
    /// feedback gate is relative to the pose at trigger time.
    pub fn trigger_flip(&mut self, now: Instant, imu: &PitchCell) {
        imu.tare();
        self.maneuver = Maneuver::Flip {
            started: now,
            phase: flip::Phase::Crouch,
        };
        ipc::report(Event::FlipStarted);
    }

    /// Apply one maneuver command. Cross-task callers post through
    /// [`crate::ipc::post`] instead and the next tick applies it; calling
    /// this directly is only safe from the control task itself.
    pub fn apply(&mut self, command: Command, imu: &PitchCell) {
        match command {
            Command::TriggerJump { now } => self.trigger_jump(now),
            Command::TriggerFlip { now } => self.trigger_flip(now, imu),
            Command::SelectGait(preset) => self.select_gait(preset),
        }
    }

    /// One control step. Mode/clock switches requested from other tasks are
    /// applied here, before the generator runs, so a tick never mixes one
    /// maneuver's parameters with another's output.
    pub async fn tick<A: CoupledActuator>(
        &mut self,
        now: Instant,
        imu: &PitchCell,
        legs: &mut LegSet<A>,
    ) {
        while let Ok(command) = ipc::COMMAND_CH.try_receive() {
            self.apply(command, imu);
        }
        let pitch = imu.read();

        match self.maneuver {
            Maneuver::Walk => self.walk_step(now, legs).await,
            Maneuver::Jump { started } => {
                let t = elapsed_secs(now, started);
                match jump::trajectory(t) {
                    JumpCommand::Target { y, gains } => {
                        for leg in 0..4 {
                            let (pair, fault) = cartesian_to_theta_gamma(
                                CartesianPoint { x: 0.0, y },
                                LEG_DIRECTIONS[leg],
                            );
                            if let Some(fault) = fault {
                                ipc::report(Event::LegReach {
                                    leg: leg as u8,
                                    fault,
                                });
                            }
                            legs.command(leg, pair.theta, pair.gamma, &gains).await;
                        }
                    }
                    JumpCommand::Complete => {
                        self.maneuver = Maneuver::Walk;
                        ipc::report(Event::JumpComplete);
                    }
                }
            }
            Maneuver::Flip { started, phase } => {
                let t = elapsed_secs(now, started);
                let next = flip::advance(phase, t, pitch);
                if next == flip::Phase::Rotate && t > FLIP_WATCHDOG_S {
                    self.maneuver = Maneuver::Walk;
                    ipc::report(Event::FlipWatchdogExpired);
                    return;
                }
                self.maneuver = Maneuver::Flip {
                    started,
                    phase: next,
                };
                for leg in 0..4 {
                    let cmd = flip::leg_command(next, leg, pitch);
                    let (pair, fault) = cartesian_to_theta_gamma(
                        CartesianPoint { x: 0.0, y: cmd.y },
                        LEG_DIRECTIONS[leg],
                    );
                    if let Some(fault) = fault {
                        ipc::report(Event::LegReach {
                            leg: leg as u8,
                            fault,
                        });
                    }
                    // theta is the pitch-tracking command, not the kinematic
                    // angle; only gamma comes from the conversion.
                    legs.command(leg, cmd.theta, pair.gamma, &cmd.gains).await;
                }
            }
        }
    }

    async fn walk_step<A: CoupledActuator>(&mut self, now: Instant, legs: &mut LegSet<A>) {
        let Some(preset) = self.walk else {
            return;
        };
        // Validated every tick before any dispatch: an invalid set skips the
        // whole tick, never sends a partial command set.
        if let Err(fault) = preset.params.validate() {
            ipc::report(Event::GaitRejected(fault));
            return;
        }
        let t = now.as_micros() as f32 / 1_000_000.0;
        for leg in 0..4 {
            let foot = gait::sin_trajectory(t, &preset.params, preset.offsets[leg]);
            let (pair, fault) = cartesian_to_theta_gamma(foot, LEG_DIRECTIONS[leg]);
            if let Some(fault) = fault {
                ipc::report(Event::LegReach {
                    leg: leg as u8,
                    fault,
                });
            }
            legs.command(leg, pair.theta, pair.gamma, &preset.gains).await;
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
