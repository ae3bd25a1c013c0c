//! cm-fluids: compound property data and mixture composition for cubicmix.
//!
//! Provides:
//! - Component records and the read-only component property table
//! - A built-in catalog of light gases and hydrocarbons
//! - Composition handling (ordered mole fractions aligned with components)
//! - Binary interaction tables and the interaction-matrix resolver
//! - Tabulated two-parameter alpha coefficients
//!
//! # Example
//!
//! ```
//! use cm_fluids::{catalog, ComponentTable, Composition};
//!
//! let table = ComponentTable::builtin();
//! let comp = Composition::from_table(
//!     table,
//!     &[(catalog::METHANE, 0.7), (catalog::PROPANE, 0.3)],
//! )
//! .unwrap();
//! assert_eq!(comp.len(), 2);
//! ```

pub mod alpha_table;
pub mod catalog;
pub mod component;
pub mod composition;
pub mod error;
pub mod interaction;

// Re-exports for ergonomics
pub use alpha_table::{AlphaCoefficients, AlphaTable};
pub use component::{Component, ComponentTable};
pub use composition::Composition;
pub use error::{FluidError, FluidResult};
pub use interaction::{
    InteractionMatrix, InteractionRecord, InteractionScope, InteractionTable,
    resolve_interaction_matrix,
};
