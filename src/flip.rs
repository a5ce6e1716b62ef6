//! Backflip maneuver.
//!
//! Four phases: crouch and launch are time-gated; the rotation phase is
//! gated on live pitch and holds until the body has rotated past the
//! threshold; the landing phase is terminal and latched, so a later pitch
//! drop does not reopen it. Front legs (0, 3) and rear legs (1, 2) are
//! driven asymmetrically, and the live pitch is injected straight into each
//! leg's theta command so the commanded hip sweep tracks body rotation.

use crate::actuator::LegGain;
use crate::config::FLIP_PITCH_THRESHOLD;
use crate::gait::GaitParams;

/// Duration of the crouch before launching (s)
pub const PREP_TIME: f32 = 0.6;
/// Duration of the front-leg launch impulse (s)
pub const LAUNCH_TIME: f32 = 0.1;

/// Gait parameters loaded when a flip is triggered.
pub const FLIP_GAIT: GaitParams = GaitParams {
    stance_height: 0.15,
    down_amp: 0.05,
    up_amp: 0.06,
    flight_percent: 0.2,
    step_length: 0.0,
    freq: 1.0,
};

/// Front-leg gains for the whole maneuver, and rear-leg gains once landing.
pub const FLIP_GAINS: LegGain = LegGain::new(120.0, 1.0, 140.0, 1.0);
/// Softer rear-leg gains while crouching, launching and rotating.
pub const REAR_GAINS: LegGain = LegGain::new(120.0, 1.0, 80.0, 1.0);

/// How far the rear legs crouch above stance before launch (m)
pub const REAR_UP_AMP: f32 = 0.75 * FLIP_GAIT.up_amp;
/// How far the rear legs extend below stance to plant for landing (m)
pub const REAR_DOWN_AMP: f32 = 0.07;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Both pairs crouch; rear on soft gains.
    Crouch,
    /// Front legs punch downward; rear unchanged.
    Launch,
    /// Rear legs reach for the landing extension on soft gains. Held until
    /// pitch crosses the threshold, however long that takes.
    Rotate,
    /// Rear legs plant on stiff gains. Terminal; only a fresh trigger
    /// re-arms the maneuver.
    Land,
}

/// Advance the phase for this tick. Monotonic in `t`: time-gated phases
/// never re-enter, and `Land` latches regardless of later pitch readings.
pub fn advance(current: Phase, t: f32, pitch: f32) -> Phase {
    if current == Phase::Land {
        return Phase::Land;
    }
    if t < PREP_TIME {
        Phase::Crouch
    } else if t < PREP_TIME + LAUNCH_TIME {
        Phase::Launch
    } else if pitch < FLIP_PITCH_THRESHOLD {
        Phase::Rotate
    } else {
        Phase::Land
    }
}

/// Per-leg command for one flip tick: vertical extension, the pitch-tracking
/// theta actually sent, and the gain set.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegCommand {
    pub y: f32,
    pub theta: f32,
    pub gains: LegGain,
}

const fn is_front(leg: usize) -> bool {
    leg == 0 || leg == 3
}

/// Mirrored pitch sign per leg so body rotation is referenced consistently
/// on both sides. The front pair flips sign once rotation starts.
fn pitch_sign(phase: Phase, leg: usize) -> f32 {
    let early = matches!(phase, Phase::Crouch | Phase::Launch);
    match (leg, early) {
        (0, true) | (1, true) | (3, false) | (1, false) => 1.0,
        _ => -1.0,
    }
}

/// What one leg should do in the given phase with the given live pitch.
pub fn leg_command(phase: Phase, leg: usize, pitch: f32) -> LegCommand {
    let stance = FLIP_GAIT.stance_height;
    let (y, gains) = if is_front(leg) {
        match phase {
            Phase::Crouch => (stance - FLIP_GAIT.up_amp, FLIP_GAINS),
            Phase::Launch => (stance + FLIP_GAIT.down_amp, FLIP_GAINS),
            Phase::Rotate | Phase::Land => (stance, FLIP_GAINS),
        }
    } else {
        match phase {
            Phase::Crouch | Phase::Launch => (stance - REAR_UP_AMP, REAR_GAINS),
            Phase::Rotate => (stance + REAR_DOWN_AMP, REAR_GAINS),
            Phase::Land => (stance + REAR_DOWN_AMP, FLIP_GAINS),
        }
    };
    LegCommand {
        y,
        theta: pitch_sign(phase, leg) * pitch,
        gains,
    }
}
