//! Derivative-free nonlinear root finding for small dense systems.
//!
//! The unknowns are an `nalgebra::DVector`; residuals are supplied as a
//! closure. The Jacobian is seeded by finite differences and then maintained
//! with Broyden rank-one updates, refreshed by finite differences whenever a
//! Broyden step fails to reduce the residual.

pub mod broyden;
pub mod error;
pub mod jacobian;

pub use broyden::{BroydenConfig, BroydenResult, broyden_solve};
pub use error::{SolverError, SolverResult};
pub use jacobian::{central_difference_jacobian, finite_difference_jacobian};
