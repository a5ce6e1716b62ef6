//! Steady-state gait: parameter set, validity predicate and the sinusoidal
//! foot trajectory generator.

use micromath::F32Ext;

use crate::config::{MAX_LEG_LENGTH, MIN_LEG_LENGTH};
use crate::kinematics::CartesianPoint;

/// Shape of one steady-state (or maneuver-phase) foot trajectory.
/// Immutable once constructed; replaced wholesale on mode or phase change.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaitParams {
    /// Nominal vertical leg extension during stance (m)
    pub stance_height: f32,
    /// How far the foot presses below stance during propulsion (m)
    pub down_amp: f32,
    /// How far the foot lifts above stance during swing (m)
    pub up_amp: f32,
    /// Fraction of the cycle spent in swing, in (0, 1]
    pub flight_percent: f32,
    /// Full stride length (m)
    pub step_length: f32,
    /// Gait cycle frequency (Hz)
    pub freq: f32,
}

/// Reason a gait parameter set was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaitFault {
    /// Leg would extend past the maximum length at the bottom of stride or
    /// at maximum horizontal excursion.
    Overextended,
    /// Leg would retract below the minimum length at the top of stride.
    Underextended,
    /// `flight_percent` outside (0, 1].
    InvalidDutyFactor,
    /// Negative cycle frequency.
    NegativeFrequency,
}

impl GaitParams {
    /// Checks that this parameter set keeps the virtual leg length inside
    /// the mechanical limits over the whole cycle and that the timing
    /// parameters are sane. Pure and idempotent; no side effects.
    pub fn validate(&self) -> Result<(), GaitFault> {
        let half_step = self.step_length / 2.0;
        // Compare squared lengths so no sqrt is needed.
        let max_excursion_sq = self.stance_height * self.stance_height + half_step * half_step;
        if self.stance_height + self.down_amp > MAX_LEG_LENGTH
            || max_excursion_sq > MAX_LEG_LENGTH * MAX_LEG_LENGTH
        {
            return Err(GaitFault::Overextended);
        }
        if self.stance_height - self.up_amp < MIN_LEG_LENGTH {
            return Err(GaitFault::Underextended);
        }
        if !(self.flight_percent > 0.0 && self.flight_percent <= 1.0) {
            return Err(GaitFault::InvalidDutyFactor);
        }
        if self.freq < 0.0 {
            return Err(GaitFault::NegativeFrequency);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Sinusoidal foot trajectory, periodic in `t` with period `1/freq`.
///
/// The per-leg `phase_offset` in [0, 1) staggers legs into gait patterns.
/// Swing lifts the foot above stance height over `flight_percent` of the
/// cycle; the remainder presses below stance height and sweeps the foot
/// back, driving propulsion. C0-continuous at the swing/stance boundary.
pub fn sin_trajectory(t: f32, params: &GaitParams, phase_offset: f32) -> CartesianPoint {
    let gp = (params.freq * t + phase_offset).fract();
    if gp <= params.flight_percent {
        let progress = gp / params.flight_percent;
        CartesianPoint {
            x: progress * params.step_length - params.step_length / 2.0,
            y: params.stance_height - params.up_amp * (core::f32::consts::PI * progress).sin(),
        }
    } else {
        let percent_back = (gp - params.flight_percent) / (1.0 - params.flight_percent);
        CartesianPoint {
            x: params.step_length / 2.0 - percent_back * params.step_length,
            y: params.stance_height
                + params.down_amp * (core::f32::consts::PI * percent_back).sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRONK: GaitParams = GaitParams {
        stance_height: 0.12,
        down_amp: 0.09,
        up_amp: 0.0,
        flight_percent: 0.9,
        step_length: 0.0,
        freq: 0.8,
    };

    #[test]
    fn accepts_pronk_preset() {
        assert_eq!(PRONK.validate(), Ok(()));
    }

    #[test]
    fn rejects_overextension_at_bottom_of_stride() {
        let params = GaitParams {
            stance_height: 0.3,
            ..PRONK
        };
        assert_eq!(params.validate(), Err(GaitFault::Overextended));
    }

    #[test]
    fn rejects_overextension_at_max_horizontal_excursion() {
        let params = GaitParams {
            stance_height: 0.2,
            down_amp: 0.0,
            step_length: 0.32,
            ..PRONK
        };
        assert_eq!(params.validate(), Err(GaitFault::Overextended));
    }

    #[test]
    fn rejects_underextension_at_top_of_stride() {
        let params = GaitParams {
            stance_height: 0.12,
            down_amp: 0.0,
            up_amp: 0.05,
            ..PRONK
        };
        assert_eq!(params.validate(), Err(GaitFault::Underextended));
    }

    #[test]
    fn rejects_zero_flight_percent() {
        let params = GaitParams {
            stance_height: 0.15,
            down_amp: 0.0,
            up_amp: 0.05,
            flight_percent: 0.0,
            step_length: 0.0,
            freq: 1.0,
        };
        assert_eq!(params.validate(), Err(GaitFault::InvalidDutyFactor));
    }

    #[test]
    fn rejects_negative_frequency() {
        let params = GaitParams { freq: -0.5, ..PRONK };
        assert_eq!(params.validate(), Err(GaitFault::NegativeFrequency));
    }

    const WALK: GaitParams = GaitParams {
        stance_height: 0.15,
        down_amp: 0.04,
        up_amp: 0.06,
        flight_percent: 0.4,
        step_length: 0.1,
        freq: 2.0,
    };

    #[test]
    fn starts_at_stance_height() {
        let p = sin_trajectory(0.0, &WALK, 0.0);
        assert!((p.y - WALK.stance_height).abs() < 1e-5);
        assert!((p.x + WALK.step_length / 2.0).abs() < 1e-5);
    }

    #[test]
    fn continuous_at_swing_stance_boundary() {
        // gp exactly at flight_percent takes the swing branch; just past it
        // takes the stance branch. Both must land at stance height.
        let t_boundary = WALK.flight_percent / WALK.freq;
        let swing = sin_trajectory(t_boundary, &WALK, 0.0);
        let stance = sin_trajectory(t_boundary + 1e-4, &WALK, 0.0);
        assert!((swing.y - WALK.stance_height).abs() < 1e-3);
        assert!((swing.y - stance.y).abs() < 2e-3);
        assert!((swing.x - stance.x).abs() < 2e-3);
    }

    #[test]
    fn periodic_in_one_over_freq() {
        let period = 1.0 / WALK.freq;
        for &t in &[0.05, 0.11, 0.27, 0.4] {
            let a = sin_trajectory(t, &WALK, 0.0);
            let b = sin_trajectory(t + period, &WALK, 0.0);
            assert!((a.x - b.x).abs() < 1e-3);
            assert!((a.y - b.y).abs() < 1e-3);
        }
    }

    #[test]
    fn phase_offset_shifts_the_cycle() {
        let a = sin_trajectory(0.1, &WALK, 0.25);
        let b = sin_trajectory(0.1 + 0.25 / WALK.freq, &WALK, 0.0);
        assert!((a.x - b.x).abs() < 1e-3);
        assert!((a.y - b.y).abs() < 1e-3);
    }

    #[test]
    fn swing_lifts_and_stance_presses() {
        // y is downward-positive: a lifted foot means y < stance_height
        let mid_swing = sin_trajectory(WALK.flight_percent / 2.0 / WALK.freq, &WALK, 0.0);
        assert!(mid_swing.y < WALK.stance_height);
        let mid_stance = sin_trajectory(
            (WALK.flight_percent + (1.0 - WALK.flight_percent) / 2.0) / WALK.freq,
            &WALK,
            0.0,
        );
        assert!(mid_stance.y > WALK.stance_height);
    }
}
