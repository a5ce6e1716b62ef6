//! Maneuver state machine types: which maneuver is running, its clock, and
//! the walk presets.

use embassy_time::Instant;

use crate::actuator::LegGain;
use crate::flip;
use crate::gait::GaitParams;

/// Which maneuver is active. Exactly one at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ManeuverMode {
    Walk,
    Jump,
    Flip,
}

/// Active maneuver plus the state that travels with it. Switching variants
/// atomically replaces the clock (and for flips, the phase), so no tick can
/// observe a new mode with a stale clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maneuver {
    /// Default state: run the selected walk preset, or hold if none armed.
    Walk,
    Jump {
        started: Instant,
    },
    Flip {
        started: Instant,
        phase: flip::Phase,
    },
}

impl Maneuver {
    pub fn mode(&self) -> ManeuverMode {
        match self {
            Maneuver::Walk => ManeuverMode::Walk,
            Maneuver::Jump { .. } => ManeuverMode::Jump,
            Maneuver::Flip { .. } => ManeuverMode::Flip,
        }
    }
}

/// A steady-state gait: trajectory shape, gains and the per-leg phase
/// offsets that stagger the legs into the pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaitPreset {
    pub params: GaitParams,
    pub gains: LegGain,
    /// Phase offset in [0, 1) per leg, indexed 0..=3.
    pub offsets: [f32; 4],
}

const GAIT_GAINS: LegGain = LegGain::new(120.0, 0.48, 80.0, 0.48);

impl GaitPreset {
    /// All four legs in phase.
    pub const fn pronk() -> Self {
        Self {
            params: GaitParams {
                stance_height: 0.12,
                down_amp: 0.09,
                up_amp: 0.0,
                flight_percent: 0.9,
                step_length: 0.0,
                freq: 0.8,
            },
            gains: GAIT_GAINS,
            offsets: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Front pair against rear pair.
    pub const fn bound() -> Self {
        Self {
            params: GaitParams {
                stance_height: 0.15,
                down_amp: 0.0,
                up_amp: 0.05,
                flight_percent: 0.35,
                step_length: 0.0,
                freq: 1.0,
            },
            gains: GAIT_GAINS,
            offsets: [0.0, 0.5, 0.5, 0.0],
        }
    }

    /// Diagonal pairs.
    pub const fn trot() -> Self {
        Self {
            params: GaitParams {
                stance_height: 0.18,
                down_amp: 0.0,
                up_amp: 0.06,
                flight_percent: 0.6,
                step_length: 0.0,
                freq: 2.0,
            },
            gains: GAIT_GAINS,
            offsets: [0.0, 0.5, 0.0, 0.5],
        }
    }
}

/// Maneuver commands. Posted cross-task through [`crate::ipc::COMMAND_CH`]
/// and applied by the control loop at the start of its next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TriggerJump { now: Instant },
    TriggerFlip { now: Instant },
    SelectGait(GaitPreset),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_validation() {
        assert!(GaitPreset::pronk().params.is_valid());
        assert!(GaitPreset::bound().params.is_valid());
        assert!(GaitPreset::trot().params.is_valid());
    }

    #[test]
    fn preset_offsets_pair_legs() {
        // pronk: all in phase
        assert_eq!(GaitPreset::pronk().offsets, [0.0; 4]);
        // bound: front pair (0, 3) against rear pair (1, 2)
        let bound = GaitPreset::bound().offsets;
        assert_eq!(bound[0], bound[3]);
        assert_eq!(bound[1], bound[2]);
        assert!(bound[0] != bound[1]);
        // trot: diagonal pairs
        let trot = GaitPreset::trot().offsets;
        assert_eq!(trot[0], trot[2]);
        assert_eq!(trot[1], trot[3]);
        assert!(trot[0] != trot[1]);
    }

    #[test]
    fn mode_tracks_variant() {
        assert_eq!(Maneuver::Walk.mode(), ManeuverMode::Walk);
        let jump = Maneuver::Jump {
            started: Instant::from_micros(0),
        };
        assert_eq!(jump.mode(), ManeuverMode::Jump);
    }
}
