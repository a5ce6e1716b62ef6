//! Planar two-link leg kinematics
//! ===========================================================
//!
//! Conversions between the three coordinate spaces of one leg:
//!
//! * hip angles `(alpha, beta)` — the two motor axes, radians, zero pointing
//!   straight down, positive CCW;
//! * leg params `(L, theta)` — virtual leg length and angle, `theta` zero
//!   straight down;
//! * Cartesian `(x, y)` — `x` along the heading direction,
//!   `y` positive toward the ground.
//!
//! All functions are pure; this is the only place a domain error
//! (unreachable leg length) can occur, and it is clamped here rather than
//! propagated as NaN so the caller always gets a commandable angle.

use micromath::F32Ext;

use crate::config::{L1, L2};

/// Foot position in the leg-direction-relative frame (m).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CartesianPoint {
    pub x: f32,
    pub y: f32,
}

/// Virtual leg length (m, always positive) and leg angle (rad).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LegParams {
    pub l: f32,
    pub theta: f32,
}

/// The two motor axis angles of one leg (rad).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HipAngles {
    pub alpha: f32,
    pub beta: f32,
}

/// Actuator-pair command: `theta` is the shared hip-sweep component,
/// `gamma` the differential leg-length component.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PairTarget {
    pub theta: f32,
    pub gamma: f32,
}

/// Commanded leg length fell outside the linkage's reachable band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReachFault {
    /// `L` too small for valid hip angles; gamma clamped to pi.
    TooShort,
    /// `L` too large for valid hip angles; gamma clamped to 0.
    TooLong,
}

/// Converts a Cartesian foot target to leg params. `leg_direction` is +/-1
/// and selects which side of the body the leg is on (mirrors x).
pub fn cartesian_to_leg_params(p: CartesianPoint, leg_direction: f32) -> LegParams {
    let l = (p.x * p.x + p.y * p.y).sqrt();
    let theta = (leg_direction * p.x).atan2(p.y);
    LegParams { l, theta }
}

/// Inverse of [`cartesian_to_leg_params`].
pub fn leg_params_to_cartesian(lp: LegParams, leg_direction: f32) -> CartesianPoint {
    CartesianPoint {
        x: leg_direction * lp.l * lp.theta.sin(),
        y: lp.l * lp.theta.cos(),
    }
}

/// Differential angle between the virtual leg and the upper link, from the
/// two-link law of cosines.
///
/// When `L` is outside the reachable band the result is clamped to the
/// nearest bound (pi at minimum reach, 0 at maximum reach) and the fault is
/// returned alongside, so a well-formed command can still be sent.
pub fn leg_params_to_gamma(l: f32) -> (f32, Option<ReachFault>) {
    let cos_param = (L1 * L1 + l * l - L2 * L2) / (2.0 * L1 * l);
    if cos_param < -1.0 {
        (core::f32::consts::PI, Some(ReachFault::TooShort))
    } else if cos_param > 1.0 {
        (0.0, Some(ReachFault::TooLong))
    } else {
        (cos_param.acos(), None)
    }
}

/// Hip angles for a leg-param target: `alpha = theta + gamma`,
/// `beta = theta - gamma`.
pub fn leg_params_to_hip_angles(lp: LegParams) -> (HipAngles, Option<ReachFault>) {
    let (gamma, fault) = leg_params_to_gamma(lp.l);
    (
        HipAngles {
            alpha: lp.theta + gamma,
            beta: lp.theta - gamma,
        },
        fault,
    )
}

/// Cartesian foot target straight to the actuator-pair convention. This is
/// the conversion the rest of the controller calls on the hot path.
pub fn cartesian_to_theta_gamma(
    p: CartesianPoint,
    leg_direction: f32,
) -> (PairTarget, Option<ReachFault>) {
    let lp = cartesian_to_leg_params(p, leg_direction);
    let (gamma, fault) = leg_params_to_gamma(lp.l);
    (
        PairTarget {
            theta: lp.theta,
            gamma,
        },
        fault,
    )
}

/// Forward kinematics, for telemetry. Recovers the foot position from the
/// two hip angles via the closed-form virtual leg length
/// `L = L1*cos(gamma) + sqrt(L2^2 - L1^2*sin(gamma)^2)`.
pub fn hip_angles_to_cartesian(hip: HipAngles, leg_direction: f32) -> CartesianPoint {
    let theta = (hip.alpha + hip.beta) / 2.0;
    let gamma = (hip.alpha - hip.beta) / 2.0;
    let s = L1 * gamma.sin();
    let l = L1 * gamma.cos() + (L2 * L2 - s * s).sqrt();
    leg_params_to_cartesian(LegParams { l, theta }, leg_direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_LEG_LENGTH, MIN_LEG_LENGTH};

    const TOL: f32 = 1e-2;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < TOL
    }

    #[test]
    fn cartesian_leg_params_round_trip() {
        for &dir in &[-1.0, 1.0] {
            for &(x, y) in &[(0.0, 0.12), (0.05, 0.15), (-0.04, 0.2), (0.08, 0.1)] {
                let p = CartesianPoint { x, y };
                let lp = cartesian_to_leg_params(p, dir);
                assert!(lp.l >= MIN_LEG_LENGTH && lp.l <= MAX_LEG_LENGTH);
                let back = leg_params_to_cartesian(lp, dir);
                assert!(close(back.x, x), "x: {} vs {}", back.x, x);
                assert!(close(back.y, y), "y: {} vs {}", back.y, y);
            }
        }
    }

    #[test]
    fn theta_gamma_is_composition() {
        let p = CartesianPoint { x: 0.03, y: 0.17 };
        for &dir in &[-1.0, 1.0] {
            let lp = cartesian_to_leg_params(p, dir);
            let (gamma, _) = leg_params_to_gamma(lp.l);
            let (pair, fault) = cartesian_to_theta_gamma(p, dir);
            assert!(fault.is_none());
            assert_eq!(pair.theta, lp.theta);
            assert_eq!(pair.gamma, gamma);
        }
    }

    #[test]
    fn gamma_clamps_short_leg_to_pi() {
        // L well below the minimum reach of the linkage
        let (gamma, fault) = leg_params_to_gamma(0.01);
        assert_eq!(gamma, core::f32::consts::PI);
        assert_eq!(fault, Some(ReachFault::TooShort));
    }

    #[test]
    fn gamma_clamps_long_leg_to_zero() {
        let (gamma, fault) = leg_params_to_gamma(0.4);
        assert_eq!(gamma, 0.0);
        assert_eq!(fault, Some(ReachFault::TooLong));
    }

    #[test]
    fn gamma_finite_at_zero_length() {
        let (gamma, fault) = leg_params_to_gamma(0.0);
        assert!(gamma == core::f32::consts::PI);
        assert_eq!(fault, Some(ReachFault::TooShort));
    }

    #[test]
    fn hip_angles_straddle_theta() {
        let lp = LegParams { l: 0.15, theta: 0.2 };
        let (hip, fault) = leg_params_to_hip_angles(lp);
        assert!(fault.is_none());
        assert!(close((hip.alpha + hip.beta) / 2.0, 0.2));
        assert!(hip.alpha > hip.beta);
    }

    #[test]
    fn forward_kinematics_inverts_ik() {
        for &dir in &[-1.0, 1.0] {
            for &(x, y) in &[(0.0, 0.12), (0.04, 0.18), (-0.06, 0.14)] {
                let p = CartesianPoint { x, y };
                let lp = cartesian_to_leg_params(p, dir);
                let (hip, fault) = leg_params_to_hip_angles(lp);
                assert!(fault.is_none());
                let back = hip_angles_to_cartesian(hip, dir);
                assert!(close(back.x, x), "x: {} vs {}", back.x, x);
                assert!(close(back.y, y), "y: {} vs {}", back.y, y);
            }
        }
    }
}
