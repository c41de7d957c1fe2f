//! Darcy friction factor.
//!
//! Laminar flow uses the closed form `f = 64 / Re`. Turbulent flow solves the
//! implicit Colebrook-White relation
//!
//! ```text
//! 1/√f = -2·log10(ε_r/3.7 + 2.51/(Re·√f))
//! ```
//!
//! by plain fixed-point iteration on `f`.

use crate::common::check_finite;
use crate::error::{HydraulicsError, HydraulicsResult};

/// Reynolds number below which flow is treated as laminar.
pub const LAMINAR_LIMIT_RE: f64 = 2000.0;

/// Iteration policy for the Colebrook-White solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColebrookConfig {
    /// Starting value for `f`
    pub initial_guess: f64,
    /// Convergence threshold on |f_new - f|
    pub tolerance: f64,
    /// Iteration cap; exceeding it is a hard failure
    pub max_iterations: usize,
    /// Reynolds number below which the laminar closed form is used
    pub laminar_limit: f64,
}

impl Default for ColebrookConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.08,
            tolerance: 1e-6,
            max_iterations: 200,
            laminar_limit: LAMINAR_LIMIT_RE,
        }
    }
}

/// One application of the Colebrook-White map `f ↦ [-2·log10(ε_r/3.7 + 2.51/(Re·√f))]⁻²`.
#[inline]
pub fn colebrook_update(reynolds: f64, relative_roughness: f64, f: f64) -> f64 {
    let inner = relative_roughness / 3.7 + 2.51 / (reynolds * f.sqrt());
    1.0 / (-2.0 * inner.log10()).powi(2)
}

/// Friction factor with the default iteration policy.
pub fn friction_factor(reynolds: f64, relative_roughness: f64) -> HydraulicsResult<f64> {
    friction_factor_with(reynolds, relative_roughness, &ColebrookConfig::default())
}

/// Friction factor for the given Reynolds number and relative roughness.
///
/// # Errors
/// - `NonPhysical` if `reynolds` is not a positive finite number or the
///   relative roughness is negative or non-finite.
/// - `ConvergenceFailed` if the turbulent iteration does not settle within
///   `config.max_iterations`.
pub fn friction_factor_with(
    reynolds: f64,
    relative_roughness: f64,
    config: &ColebrookConfig,
) -> HydraulicsResult<f64> {
    check_finite(reynolds, "Reynolds number")?;
    check_finite(relative_roughness, "relative roughness")?;
    if reynolds <= 0.0 {
        return Err(HydraulicsError::NonPhysical {
            what: "Reynolds number must be positive",
        });
    }
    if relative_roughness < 0.0 {
        return Err(HydraulicsError::NonPhysical {
            what: "relative roughness cannot be negative",
        });
    }

    if reynolds < config.laminar_limit {
        return Ok(64.0 / reynolds);
    }

    let mut f = config.initial_guess;
    let mut last_delta = f64::INFINITY;
    for _ in 0..config.max_iterations {
        let f_new = colebrook_update(reynolds, relative_roughness, f);
        last_delta = (f_new - f).abs();
        if last_delta < config.tolerance {
            return Ok(f_new);
        }
        f = f_new;
    }

    Err(HydraulicsError::ConvergenceFailed {
        what: "Colebrook-White friction factor",
        iterations: config.max_iterations,
        last_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laminar_is_exact() {
        let f = friction_factor(1000.0, 1e-4).unwrap();
        assert_eq!(f, 0.064);
    }

    #[test]
    fn laminar_limit_is_exclusive() {
        // Re = 2000 already takes the turbulent branch
        let f = friction_factor(2000.0, 0.0).unwrap();
        assert!((f - 64.0 / 2000.0).abs() > 1e-6);
    }

    #[test]
    fn turbulent_converges_to_fixed_point() {
        let re = 1.0e5;
        let eps = 1.0e-4;
        let f = friction_factor(re, eps).unwrap();
        assert!(f > 0.015 && f < 0.025, "f = {f}");
        let residual = (colebrook_update(re, eps, f) - f).abs();
        assert!(residual < 1e-6, "residual = {residual}");
    }

    #[test]
    fn smooth_pipe_turbulent() {
        // Smooth pipe at Re = 1e6 is close to 0.0117
        let f = friction_factor(1.0e6, 0.0).unwrap();
        assert!((f - 0.0117).abs() < 5e-4, "f = {f}");
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let config = ColebrookConfig {
            max_iterations: 1,
            ..ColebrookConfig::default()
        };
        let err = friction_factor_with(1.0e5, 1.0e-4, &config).unwrap_err();
        match err {
            HydraulicsError::ConvergenceFailed {
                iterations,
                last_delta,
                ..
            } => {
                assert_eq!(iterations, 1);
                assert!(last_delta >= 1e-6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_physical_inputs() {
        assert!(matches!(
            friction_factor(0.0, 1e-4),
            Err(HydraulicsError::NonPhysical { .. })
        ));
        assert!(matches!(
            friction_factor(f64::NAN, 1e-4),
            Err(HydraulicsError::NonPhysical { .. })
        ));
        assert!(matches!(
            friction_factor(1e5, -1e-4),
            Err(HydraulicsError::NonPhysical { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn laminar_matches_closed_form(re in 1.0_f64..1999.0) {
            let f = friction_factor(re, 1e-4).unwrap();
            prop_assert_eq!(f, 64.0 / re);
        }

        #[test]
        fn turbulent_result_is_colebrook_fixed_point(
            re in 4.0e3_f64..1.0e8,
            eps in 0.0_f64..0.01,
        ) {
            let f = friction_factor(re, eps).unwrap();
            prop_assert!(f > 0.0 && f < 0.1);
            prop_assert!((colebrook_update(re, eps, f) - f).abs() < 1e-6);
        }
    }
}
