//! Property-data and composition errors.

use cm_core::{CmError, ComponentId};
use thiserror::Error;

/// Result type for property-data operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while looking up compound data or building mixtures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// A required per-compound property is absent or unusable.
    #[error("Missing critical data for component {id}: {what}")]
    MissingCriticalData { id: ComponentId, what: &'static str },

    /// The component id is not present in the property table.
    #[error("Unknown component id {id}")]
    UnknownComponent { id: ComponentId },

    /// Non-physical values (negative fraction, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Two arrays that must be index-aligned have different lengths.
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

impl From<FluidError> for CmError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::NonPhysical { what } => CmError::Invariant {
                what: format!("Non-physical fluid value: {what}"),
            },
            other => CmError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
