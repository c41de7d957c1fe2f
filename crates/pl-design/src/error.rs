//! Error types for design evaluation and the optimization sweep.

use pl_hydraulics::HydraulicsError;
use thiserror::Error;

/// Errors that abort a design evaluation or a sweep.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    #[error("Hydraulics error: {0}")]
    Hydraulics(#[from] HydraulicsError),

    #[error("Invalid sweep range for {what}: {reason}")]
    InvalidRange {
        what: &'static str,
        reason: &'static str,
    },

    #[error("Empty sweep range: {what}")]
    EmptyRange { what: &'static str },

    #[error("No feasible design: no grid point produced a finite cost")]
    NoFeasibleDesign,
}

impl DesignError {
    /// True when the friction iteration failed to converge.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(
            self,
            DesignError::Hydraulics(HydraulicsError::ConvergenceFailed { .. })
        )
    }
}

pub type DesignResult<T> = Result<T, DesignError>;
