//! Common checks for hydraulic inputs.

use crate::error::HydraulicsResult;
use pl_core::numeric::{ensure_finite, ensure_in_range, ensure_positive};

/// Ensure a value is finite, returning `HydraulicsError::NonPhysical` if not.
pub fn check_finite(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    Ok(ensure_positive(value, what)?)
}

/// Ensure a fraction lies within `[0, 1]`.
pub fn check_fraction(value: f64, what: &'static str) -> HydraulicsResult<f64> {
    Ok(ensure_in_range(value, 0.0, 1.0, what, "[0, 1]")?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HydraulicsError;

    #[test]
    fn check_positive_maps_to_non_physical() {
        let err = check_positive(-1.0, "diameter").unwrap_err();
        assert_eq!(err, HydraulicsError::NonPhysical { what: "diameter" });
        assert_eq!(check_finite(3.0, "x").unwrap(), 3.0);
    }

    #[test]
    fn check_fraction_bounds() {
        assert_eq!(check_fraction(1.0, "burial fraction").unwrap(), 1.0);
        assert!(check_fraction(-0.1, "burial fraction").is_err());
        assert!(check_fraction(f64::NAN, "burial fraction").is_err());
    }
}
