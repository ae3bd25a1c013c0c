//! cm-eos: cubic equations of state for gas mixtures.
//!
//! Provides:
//! - Three cubic families (van der Waals, SRK, Soave-modified SRK) behind one
//!   generic cubic form
//! - Four mixing rules for the attraction parameter
//! - Robust real-root extraction with liquid/vapor selection
//! - Mixture critical point via the Heidemann-Khalil criticality conditions
//! - Linear pseudocritical estimates
//! - Isotherm sweeps and parallel batch evaluation
//!
//! # Example
//!
//! ```
//! use cm_core::units::{k, pa, molar_volume_cm3};
//! use cm_eos::{Evaluator, Phase};
//! use cm_fluids::{catalog, ComponentTable, Composition};
//!
//! let comp = Composition::from_table(ComponentTable::builtin(), &[(catalog::PROPANE, 1.0)]).unwrap();
//! let eval = Evaluator::default();
//! let roots = eval.volumes(&comp, k(300.0), pa(9.9742e5)).unwrap();
//! let v_vap = molar_volume_cm3(roots.volume(Phase::Vapor));
//! assert!((v_vap - 2065.0).abs() < 1.0);
//! ```

pub mod alpha;
pub mod config;
pub mod critical;
pub mod cubic;
pub mod error;
pub mod evaluate;
pub mod family;
pub mod mixing;
pub mod pseudocritical;
pub mod sweep;

// Re-exports for ergonomics
pub use alpha::{AlphaFunction, SoaveAlpha, TabulatedAlpha};
pub use config::EosConfig;
pub use critical::{CriticalConfig, CriticalPoint, critical_point};
pub use cubic::{CubicCoefficients, CubicForm, CubicRoots, DEFAULT_NEAR_CRITICAL_REL_TOL, Phase};
pub use error::{EosError, EosResult};
pub use evaluate::{Evaluator, Mixture, StateQuery};
pub use family::{ComponentParameters, EosFamily, soave_parameters};
pub use mixing::{MixingRule, MixingRuleFn, MixtureParameters, mix};
pub use pseudocritical::{PseudoCritical, chueh_prausnitz_volume, pseudocritical};
pub use sweep::{IsothermResult, SweepDefinition, SweepType};
