//! Mixture composition (ordered components and mole fractions).

use crate::component::{Component, ComponentTable};
use crate::error::{FluidError, FluidResult};
use cm_core::ComponentId;
use cm_core::numeric::{Tolerances, nearly_equal};

/// Ordered components with normalized mole fractions.
///
/// The mole fractions are always normalized (sum to 1.0) and aligned index for
/// index with the components. Zero fractions are kept so that index-aligned
/// arrays (per-compound parameters, interaction matrices) keep their shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    components: Vec<Component>,
    fractions: Vec<f64>,
}

impl Composition {
    /// Create a pure-compound composition.
    pub fn pure(component: Component) -> Self {
        Self {
            components: vec![component],
            fractions: vec![1.0],
        }
    }

    /// Create a composition from mole fractions.
    ///
    /// Validates that all fractions are finite, non-negative, and have a positive sum,
    /// then normalizes to sum=1.
    pub fn new(items: Vec<(Component, f64)>) -> FluidResult<Self> {
        if items.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "empty composition",
            });
        }

        let mut sum = 0.0;
        for (_, frac) in &items {
            if !frac.is_finite() {
                return Err(FluidError::NonPhysical {
                    what: "non-finite mole fraction",
                });
            }
            if *frac < 0.0 {
                return Err(FluidError::NonPhysical {
                    what: "negative mole fraction",
                });
            }
            sum += frac;
        }

        if sum <= 0.0 || !sum.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "mole fractions sum to zero or non-finite",
            });
        }

        let (components, fractions) = items.into_iter().map(|(c, f)| (c, f / sum)).unzip();
        Ok(Self {
            components,
            fractions,
        })
    }

    /// Create a composition from separate, index-aligned component and fraction lists.
    pub fn from_parts(components: Vec<Component>, fractions: Vec<f64>) -> FluidResult<Self> {
        if components.len() != fractions.len() {
            return Err(FluidError::DimensionMismatch {
                what: "mole fractions",
                expected: components.len(),
                found: fractions.len(),
            });
        }
        Self::new(components.into_iter().zip(fractions).collect())
    }

    /// Create a composition by looking up ids in a property table.
    pub fn from_table(table: &ComponentTable, items: &[(ComponentId, f64)]) -> FluidResult<Self> {
        let items = items
            .iter()
            .map(|&(id, x)| table.get(id).map(|c| (c.clone(), x)))
            .collect::<FluidResult<Vec<_>>>()?;
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn ids(&self) -> Vec<ComponentId> {
        self.components.iter().map(|c| c.id).collect()
    }

    /// Get mole fraction of a component (0.0 if not present).
    pub fn mole_fraction(&self, id: ComponentId) -> f64 {
        self.iter()
            .find(|(c, _)| c.id == id)
            .map(|(_, x)| x)
            .unwrap_or(0.0)
    }

    /// Returns the component whose fraction is ≈1.0, if any.
    pub fn is_pure(&self) -> Option<&Component> {
        let tol = Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        };
        self.iter()
            .find(|(_, x)| nearly_equal(*x, 1.0, tol))
            .map(|(c, _)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Component, f64)> + '_ {
        self.components.iter().zip(self.fractions.iter().copied())
    }

    /// Mixture molar mass [g/mol], if every component has one.
    pub fn molar_mass(&self) -> Option<f64> {
        self.iter()
            .map(|(c, x)| c.molar_mass.map(|m| m * x))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn table() -> &'static ComponentTable {
        ComponentTable::builtin()
    }

    #[test]
    fn pure_composition() {
        let propane = table().get(catalog::PROPANE).unwrap().clone();
        let comp = Composition::pure(propane);
        assert_eq!(comp.is_pure().map(|c| c.id), Some(catalog::PROPANE));
        assert_eq!(comp.mole_fraction(catalog::PROPANE), 1.0);
        assert_eq!(comp.mole_fraction(catalog::METHANE), 0.0);
    }

    #[test]
    fn mixture_normalization_non_unit_sum() {
        let comp = Composition::from_table(
            table(),
            &[(catalog::METHANE, 2.0), (catalog::ETHANE, 8.0)],
        )
        .unwrap();

        let tol = Tolerances {
            abs: 1e-10,
            rel: 1e-10,
        };
        assert!(nearly_equal(comp.mole_fraction(catalog::METHANE), 0.2, tol));
        assert!(nearly_equal(comp.mole_fraction(catalog::ETHANE), 0.8, tol));
        assert!(comp.is_pure().is_none());
    }

    #[test]
    fn zero_fractions_are_kept() {
        let comp = Composition::from_table(
            table(),
            &[(catalog::METHANE, 0.0), (catalog::PROPANE, 1.0)],
        )
        .unwrap();
        assert_eq!(comp.len(), 2);
        assert_eq!(comp.fractions(), &[0.0, 1.0]);
        assert_eq!(comp.is_pure().map(|c| c.id), Some(catalog::PROPANE));
    }

    #[test]
    fn invalid_negative_fraction() {
        let result = Composition::from_table(
            table(),
            &[(catalog::METHANE, -0.5), (catalog::ETHANE, 1.5)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_zero_sum() {
        let result = Composition::from_table(
            table(),
            &[(catalog::METHANE, 0.0), (catalog::ETHANE, 0.0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_non_finite() {
        let result = Composition::from_table(table(), &[(catalog::METHANE, f64::NAN)]);
        assert!(result.is_err());
    }

    #[test]
    fn from_parts_checks_lengths() {
        let c = table().get(catalog::METHANE).unwrap().clone();
        let err = Composition::from_parts(vec![c], vec![0.5, 0.5]).unwrap_err();
        assert!(matches!(err, FluidError::DimensionMismatch { .. }));
    }

    #[test]
    fn molar_mass_weighted() {
        let comp = Composition::from_table(
            table(),
            &[(catalog::METHANE, 0.5), (catalog::PROPANE, 0.5)],
        )
        .unwrap();
        let m = comp.molar_mass().unwrap();
        assert!((m - 0.5 * (16.043 + 44.097)).abs() < 1e-9);
    }
}
