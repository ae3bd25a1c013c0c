//! Error types for EOS evaluation.

use cm_core::{CmError, ComponentId};
use cm_fluids::FluidError;
use cm_solver::SolverError;
use thiserror::Error;

pub type EosResult<T> = Result<T, EosError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// A required per-compound property is absent or unusable.
    #[error("Missing critical data for component {id}: {what}")]
    MissingCriticalData { id: ComponentId, what: &'static str },

    /// Composition and parameter arrays are not index-aligned.
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("No physical volume root at T = {temperature} K, P = {pressure} Pa")]
    NoPhysicalRoot { temperature: f64, pressure: f64 },

    #[error(
        "Critical point did not converge after {iterations} iterations (residual {residual:e})"
    )]
    CriticalPointConvergence { iterations: usize, residual: f64 },

    #[error("Fluid data error: {0}")]
    Fluid(FluidError),

    #[error("Solver error: {0}")]
    Solver(SolverError),

    #[error("Invalid input: {what}")]
    InvalidInput { what: String },
}

impl From<FluidError> for EosError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::MissingCriticalData { id, what } => {
                EosError::MissingCriticalData { id, what }
            }
            FluidError::DimensionMismatch {
                what,
                expected,
                found,
            } => EosError::DimensionMismatch {
                what,
                expected,
                found,
            },
            other => EosError::Fluid(other),
        }
    }
}

impl From<SolverError> for EosError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::ConvergenceFailed {
                iterations,
                residual_norm,
                ..
            } => EosError::CriticalPointConvergence {
                iterations,
                residual: residual_norm,
            },
            other => EosError::Solver(other),
        }
    }
}

impl From<CmError> for EosError {
    fn from(err: CmError) -> Self {
        EosError::InvalidInput {
            what: err.to_string(),
        }
    }
}

impl From<EosError> for CmError {
    fn from(err: EosError) -> Self {
        match err {
            EosError::InvalidInput { what } => CmError::InvalidArg { what },
            EosError::DimensionMismatch { .. } | EosError::MissingCriticalData { .. } => {
                CmError::InvalidArg {
                    what: err.to_string(),
                }
            }
            other => CmError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cm_core::component_id;

    #[test]
    fn fluid_errors_map_onto_eos_taxonomy() {
        let err: EosError = FluidError::MissingCriticalData {
            id: component_id!(4),
            what: "critical pressure",
        }
        .into();
        assert!(matches!(err, EosError::MissingCriticalData { .. }));

        let err: EosError = FluidError::UnknownComponent {
            id: component_id!(9),
        }
        .into();
        assert!(matches!(err, EosError::Fluid(_)));
    }

    #[test]
    fn solver_convergence_failure_becomes_critical_error() {
        let err: EosError = SolverError::ConvergenceFailed {
            what: "line search stagnated".to_string(),
            iterations: 12,
            residual_norm: 0.5,
        }
        .into();
        assert_eq!(
            err,
            EosError::CriticalPointConvergence {
                iterations: 12,
                residual: 0.5
            }
        );
    }

    #[test]
    fn core_argument_errors_become_invalid_input() {
        let err: EosError = cm_core::ensure_positive(-1.0, "pressure").unwrap_err().into();
        assert!(matches!(err, EosError::InvalidInput { ref what } if what.contains("pressure")));
    }

    #[test]
    fn error_display() {
        let err = EosError::NoPhysicalRoot {
            temperature: 300.0,
            pressure: 1e5,
        };
        assert!(err.to_string().contains("No physical volume root"));
    }
}
