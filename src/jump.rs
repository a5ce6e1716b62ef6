//! Jump maneuver: three fixed-duration phases gated purely on time since
//! trigger. All four legs move together, straight vertical (x = 0), so
//! every leg gets the identical pair target each tick.

use crate::actuator::LegGain;

/// Duration legs settle at stance before the jump (s)
pub const PREP_TIME: f32 = 0.5;
/// Duration of the propulsive extension (s). Intentionally long: the
/// extension approximates a ramp, not an impulse.
pub const LAUNCH_TIME: f32 = 5.0;
/// Duration of the landing retraction before normal behavior resumes (s)
pub const FALL_TIME: f32 = 1.0;

/// Leg extension while settling before the jump (m)
pub const STANCE_HEIGHT: f32 = 0.09;
/// Maximum leg extension during launch (m)
pub const JUMP_EXTENSION: f32 = 0.24;
/// Leg extension held while falling (m)
pub const FALL_EXTENSION: f32 = 0.13;

/// Small stiffness, lots of damping: settle and landing absorption.
pub const SOFT_GAINS: LegGain = LegGain::new(50.0, 1.0, 50.0, 1.0);
/// High stiffness, low damping: the propulsive extension.
pub const LAUNCH_GAINS: LegGain = LegGain::new(160.0, 0.5, 160.0, 0.3);

/// What the jump wants this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JumpCommand {
    /// Hold all four legs at extension `y` with the given gains.
    Target { y: f32, gains: LegGain },
    /// Past all three phases; the state machine should fall back to WALK.
    Complete,
}

/// Open-loop jump trajectory as a pure function of seconds since trigger.
pub fn trajectory(t: f32) -> JumpCommand {
    if t < PREP_TIME {
        JumpCommand::Target {
            y: STANCE_HEIGHT,
            gains: SOFT_GAINS,
        }
    } else if t < PREP_TIME + LAUNCH_TIME {
        JumpCommand::Target {
            y: JUMP_EXTENSION,
            gains: LAUNCH_GAINS,
        }
    } else if t < PREP_TIME + LAUNCH_TIME + FALL_TIME {
        JumpCommand::Target {
            y: FALL_EXTENSION,
            gains: SOFT_GAINS,
        }
    } else {
        JumpCommand::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_at_stance_with_soft_gains() {
        for &t in &[0.0, 0.2, 0.49] {
            assert_eq!(
                trajectory(t),
                JumpCommand::Target {
                    y: STANCE_HEIGHT,
                    gains: SOFT_GAINS,
                }
            );
        }
    }

    #[test]
    fn extends_with_stiff_gains_after_prep() {
        assert_eq!(
            trajectory(0.51),
            JumpCommand::Target {
                y: JUMP_EXTENSION,
                gains: LAUNCH_GAINS,
            }
        );
        assert_eq!(
            trajectory(5.4),
            JumpCommand::Target {
                y: JUMP_EXTENSION,
                gains: LAUNCH_GAINS,
            }
        );
    }

    #[test]
    fn retracts_softly_for_landing() {
        assert_eq!(
            trajectory(5.6),
            JumpCommand::Target {
                y: FALL_EXTENSION,
                gains: SOFT_GAINS,
            }
        );
        assert_eq!(
            trajectory(6.4),
            JumpCommand::Target {
                y: FALL_EXTENSION,
                gains: SOFT_GAINS,
            }
        );
    }

    #[test]
    fn completes_after_all_phases() {
        assert_eq!(trajectory(6.6), JumpCommand::Complete);
        assert_eq!(trajectory(100.0), JumpCommand::Complete);
    }
}
