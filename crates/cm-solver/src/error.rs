//! Error types for solver operations.

use cm_core::error::CmError;
use thiserror::Error;

/// Errors that can occur during nonlinear solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Convergence failed after {iterations} iterations (residual {residual_norm:e}): {what}")]
    ConvergenceFailed {
        what: String,
        iterations: usize,
        residual_norm: f64,
    },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for CmError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::InvalidInput { what } => CmError::InvalidArg { what },
            other => CmError::Invariant {
                what: other.to_string(),
            },
        }
    }
}
