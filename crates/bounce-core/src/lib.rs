//! Core types for the bouncing-ball workspace
//!
//! Includes:
//! - Physical constants (gravity, default integration timestep)
//! - Simulation parameters & validation
//! - Closed-form bounce-count estimate from the geometric height decay

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// -------------------------
/// Constants
/// -------------------------

/// Gravitational acceleration [m/s^2]
pub const GRAVITY: f64 = 9.81;

/// Default integration timestep [s]. Smaller is more accurate, slower.
/// The simulator takes the timestep as an explicit option; this is only
/// its default.
pub const DEFAULT_TIME_STEP: f64 = 0.005;

/// -------------------------
/// Parameters
/// -------------------------

/// Validation failures for [`SimulationParams`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("heights must be strictly positive")]
    NonPositiveHeight,
    #[error("minimum height cannot exceed the initial height")]
    MinimumAboveInitial,
    #[error("efficiency must lie in (0, 1); the decay would never reach the minimum")]
    EfficiencyOutOfRange,
}

/// Inputs for one simulation run.
///
/// The bounce apex decays geometrically: apex after bounce `n` is
/// `initial_height * efficiency^n`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Drop height [m]
    pub initial_height: f64,
    /// Threshold the bounce apex must fall below [m]
    pub minimum_height: f64,
    /// Fraction of bounce height retained per bounce, in (0, 1)
    pub efficiency: f64,
}

impl SimulationParams {
    /// Check the domain constraints the rest of the workspace assumes.
    ///
    /// The estimator and simulator do not re-validate; callers at the
    /// boundary (CLI, FFI) reject bad input here first. An efficiency at or
    /// above 1 never converges, and non-positive heights make the
    /// logarithmic estimate undefined.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.initial_height <= 0.0 || self.minimum_height <= 0.0 {
            return Err(ParamError::NonPositiveHeight);
        }
        if self.minimum_height > self.initial_height {
            return Err(ParamError::MinimumAboveInitial);
        }
        if self.efficiency <= 0.0 || self.efficiency >= 1.0 {
            return Err(ParamError::EfficiencyOutOfRange);
        }
        Ok(())
    }
}

/// -------------------------
/// Bounce estimate
/// -------------------------

/// Theoretical number of bounces for the apex to fall below the minimum.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BounceEstimate {
    /// Real-valued solution of `initial * efficiency^n = minimum`
    pub exact: f64,
    /// `floor(exact)`; signed because the simulator may decrement it below
    /// zero when the decay lands exactly on the threshold
    pub floored: i64,
}

/// Closed-form bounce count from the geometric decay.
///
/// `exact = ln(minimum / initial) / ln(efficiency)`. Both logs are
/// non-positive for valid parameters, so the quotient is non-negative;
/// equal heights give exactly zero. Assumes [`SimulationParams::validate`]
/// has passed.
#[allow(clippy::cast_possible_truncation)]
pub fn estimate_bounces(params: SimulationParams) -> BounceEstimate {
    let exact =
        (params.minimum_height / params.initial_height).ln() / params.efficiency.ln();
    BounceEstimate {
        exact,
        floored: exact.floor() as i64,
    }
}

/* -------------------------------- tests -------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(initial: f64, minimum: f64, efficiency: f64) -> SimulationParams {
        SimulationParams {
            initial_height: initial,
            minimum_height: minimum,
            efficiency,
        }
    }

    #[test]
    fn equal_heights_need_zero_bounces() {
        let est = estimate_bounces(params(10.0, 10.0, 0.5));
        assert_relative_eq!(est.exact, 0.0);
        assert_eq!(est.floored, 0);
    }

    #[test]
    fn halving_down_two_decades() {
        // ln(0.01) / ln(0.5) = 6.643...
        let est = estimate_bounces(params(10.0, 0.1, 0.5));
        assert_relative_eq!(est.exact, 6.643_856_189_774_724, epsilon = 1e-12);
        assert_eq!(est.floored, 6);
    }

    #[test]
    fn floored_brackets_the_threshold() {
        let p = params(7.3, 0.42, 0.81);
        let est = estimate_bounces(p);
        assert!(est.floored >= 0);
        assert!((est.floored as f64) <= est.exact);

        // initial * eff^floored > minimum >= initial * eff^(floored+1)
        let above = p.initial_height * p.efficiency.powi(est.floored as i32);
        let below = p.initial_height * p.efficiency.powi(est.floored as i32 + 1);
        assert!(above > p.minimum_height);
        assert!(below <= p.minimum_height + 1e-12);
    }

    #[test]
    fn validate_accepts_good_params() {
        assert!(params(10.0, 0.1, 0.5).validate().is_ok());
        assert!(params(10.0, 10.0, 0.99).validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_params() {
        assert_eq!(
            params(0.0, 0.1, 0.5).validate(),
            Err(ParamError::NonPositiveHeight)
        );
        assert_eq!(
            params(10.0, -1.0, 0.5).validate(),
            Err(ParamError::NonPositiveHeight)
        );
        assert_eq!(
            params(1.0, 2.0, 0.5).validate(),
            Err(ParamError::MinimumAboveInitial)
        );
        assert_eq!(
            params(10.0, 0.1, 1.0).validate(),
            Err(ParamError::EfficiencyOutOfRange)
        );
        assert_eq!(
            params(10.0, 0.1, 0.0).validate(),
            Err(ParamError::EfficiencyOutOfRange)
        );
    }
}
