//! cm-core: stable foundation for cubicmix.
//!
//! Contains:
//! - units (uom SI types + constructors, gas constant)
//! - numeric (Real + tolerances + float helpers)
//! - ids (compact component identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::CmError;
pub use ids::*;
pub use numeric::*;
pub use units::*;
