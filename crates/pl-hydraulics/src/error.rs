//! Error types for hydraulic calculations.

use pl_core::PlError;
use thiserror::Error;

/// Errors that can occur while building a pipe candidate or tracing a route.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HydraulicsError {
    #[error("Convergence failed: {what} (no fixed point after {iterations} iterations, last |df| = {last_delta:e})")]
    ConvergenceFailed {
        what: &'static str,
        iterations: usize,
        last_delta: f64,
    },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },
}

pub type HydraulicsResult<T> = Result<T, HydraulicsError>;

impl From<PlError> for HydraulicsError {
    fn from(e: PlError) -> Self {
        match e {
            PlError::NonFinite { what, .. } => HydraulicsError::NonPhysical { what },
            PlError::OutOfRange { what, .. } => HydraulicsError::NonPhysical { what },
        }
    }
}
