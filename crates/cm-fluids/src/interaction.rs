//! Binary interaction coefficients.
//!
//! [`InteractionTable`] stores experimental kᵢⱼ fits scoped by EOS family name.
//! [`resolve_interaction_matrix`] builds the n×n matrix for an ordered component
//! list: table entry first, then the generalized correlations of API procedure
//! 8D1.1, then zero.

use crate::catalog;
use crate::component::Component;
use crate::error::{FluidError, FluidResult};
use cm_core::ComponentId;
use std::collections::HashMap;
use tracing::debug;

/// Square interaction-coefficient matrix over a component index set.
///
/// The diagonal is zero. Entries may be asymmetric (kᵢⱼ ≠ kⱼᵢ).
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    n: usize,
    values: Vec<f64>,
}

impl InteractionMatrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Build from row vectors. Rows must form a square matrix with a zero diagonal.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> FluidResult<Self> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(FluidError::DimensionMismatch {
                    what: "interaction matrix row",
                    expected: n,
                    found: row.len(),
                });
            }
            if row.iter().any(|k| !k.is_finite()) {
                return Err(FluidError::NonPhysical {
                    what: "non-finite interaction coefficient",
                });
            }
            if row[i] != 0.0 {
                return Err(FluidError::InvalidArg {
                    what: "interaction matrix diagonal must be zero",
                });
            }
            values.extend(row);
        }
        Ok(Self { n, values })
    }

    /// Number of components.
    pub fn size(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, k: f64) {
        self.values[i * self.n + j] = k;
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        (0..self.n).all(|i| (0..i).all(|j| (self.get(i, j) - self.get(j, i)).abs() <= tol))
    }

    /// (K + Kᵀ)/2.
    pub fn symmetrized(&self) -> Self {
        let mut out = self.clone();
        for i in 0..self.n {
            for j in 0..self.n {
                out.set(i, j, 0.5 * (self.get(i, j) + self.get(j, i)));
            }
        }
        out
    }
}

/// One table row: kᵢⱼ for an ordered id pair under an EOS family name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractionRecord {
    pub eos: String,
    pub i: ComponentId,
    pub j: ComponentId,
    pub kij: f64,
}

/// EOS-name-scoped binary interaction table.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<InteractionRecord>", into = "Vec<InteractionRecord>")
)]
pub struct InteractionTable {
    scopes: HashMap<String, HashMap<(ComponentId, ComponentId), f64>>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert kᵢⱼ for the ordered pair (i, j).
    pub fn insert(&mut self, eos: &str, i: ComponentId, j: ComponentId, kij: f64) {
        self.scopes
            .entry(eos.to_string())
            .or_default()
            .insert((i, j), kij);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_pair(mut self, eos: &str, i: ComponentId, j: ComponentId, kij: f64) -> Self {
        self.insert(eos, i, j, kij);
        self
    }

    /// Ordered-pair lookup; falls back to the reversed pair.
    pub fn lookup(&self, eos: &str, i: ComponentId, j: ComponentId) -> Option<f64> {
        let scope = self.scopes.get(eos)?;
        scope.get(&(i, j)).or_else(|| scope.get(&(j, i))).copied()
    }

    pub fn records(&self) -> Vec<InteractionRecord> {
        let mut out: Vec<InteractionRecord> = self
            .scopes
            .iter()
            .flat_map(|(eos, pairs)| {
                pairs.iter().map(move |(&(i, j), &kij)| InteractionRecord {
                    eos: eos.clone(),
                    i,
                    j,
                    kij,
                })
            })
            .collect();
        out.sort_by(|a, b| (&a.eos, a.i, a.j).cmp(&(&b.eos, b.i, b.j)));
        out
    }
}

impl From<Vec<InteractionRecord>> for InteractionTable {
    fn from(records: Vec<InteractionRecord>) -> Self {
        let mut table = Self::new();
        for r in records {
            table.insert(&r.eos, r.i, r.j, r.kij);
        }
        table
    }
}

impl From<InteractionTable> for Vec<InteractionRecord> {
    fn from(table: InteractionTable) -> Self {
        table.records()
    }
}

/// A table together with the EOS family name whose entries should be used.
#[derive(Debug, Clone, Copy)]
pub struct InteractionScope<'a> {
    pub table: &'a InteractionTable,
    pub eos: &'a str,
}

/// Resolve the n×n interaction matrix for an ordered component list.
///
/// Without a scope every coefficient is zero. With a scope, each off-diagonal
/// entry is the table value, else a generalized correlation, else zero.
/// `temperature` [K] is needed only by the hydrogen correlation.
pub fn resolve_interaction_matrix(
    components: &[Component],
    scope: Option<InteractionScope<'_>>,
    temperature: Option<f64>,
) -> InteractionMatrix {
    let n = components.len();
    let mut kij = InteractionMatrix::zeros(n);
    let Some(scope) = scope else {
        return kij;
    };

    for (i, ci) in components.iter().enumerate() {
        for (j, cj) in components.iter().enumerate() {
            if i == j {
                continue;
            }
            let k = match scope.table.lookup(scope.eos, ci.id, cj.id) {
                Some(k) => k,
                None => {
                    let k = generalized(ci, cj, temperature).unwrap_or(0.0);
                    debug!(i = %ci.id, j = %cj.id, eos = scope.eos, k, "kij from fallback");
                    k
                }
            };
            kij.set(i, j, k);
        }
    }
    kij
}

/// Generalized correlations, first rule matching either member of the pair.
fn generalized(ci: &Component, cj: &Component, temperature: Option<f64>) -> Option<f64> {
    let involves = |id: ComponentId| ci.id == id || cj.id == id;
    let solubility_gap = || {
        let di = ci.solubility_parameter?;
        let dj = cj.solubility_parameter?;
        Some((di - dj).abs())
    };

    if involves(catalog::HYDROGEN) {
        let h2 = if ci.id == catalog::HYDROGEN { ci } else { cj };
        let tr = temperature? / h2.tc?;
        Some(1.0 / (344.23 * (-0.48586 * tr).exp() + 1.0))
    } else if involves(catalog::METHANE) {
        solubility_gap().map(|d| 0.014 * d)
    } else if involves(catalog::NITROGEN) {
        solubility_gap().map(|d| 0.0403 * d)
    } else if involves(catalog::CARBON_MONOXIDE) {
        Some(0.0)
    } else if involves(catalog::CARBON_DIOXIDE) {
        Some(0.1)
    } else if involves(catalog::HYDROGEN_SULFIDE) {
        solubility_gap().map(|d| 0.0316 * d)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentTable;

    fn comps(ids: &[ComponentId]) -> Vec<Component> {
        ComponentTable::builtin().lookup_all(ids).unwrap()
    }

    #[test]
    fn no_scope_gives_zero_matrix() {
        let c = comps(&[catalog::METHANE, catalog::PROPANE]);
        let k = resolve_interaction_matrix(&c, None, Some(300.0));
        assert_eq!(k, InteractionMatrix::zeros(2));
    }

    #[test]
    fn table_entry_wins_and_serves_both_orders() {
        let table = InteractionTable::new().with_pair("SRK", catalog::ETHANE, catalog::PROPANE, 0.01);
        let c = comps(&[catalog::ETHANE, catalog::PROPANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), None);
        assert_eq!(k.get(0, 1), 0.01);
        assert_eq!(k.get(1, 0), 0.01);
        assert_eq!(k.get(0, 0), 0.0);
    }

    #[test]
    fn asymmetric_entries_are_preserved() {
        let table = InteractionTable::new()
            .with_pair("SRK", catalog::ETHANE, catalog::PROPANE, 0.01)
            .with_pair("SRK", catalog::PROPANE, catalog::ETHANE, 0.03);
        let c = comps(&[catalog::ETHANE, catalog::PROPANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), None);
        assert_eq!(k.get(0, 1), 0.01);
        assert_eq!(k.get(1, 0), 0.03);
        assert!(!k.is_symmetric(1e-12));
        assert!(k.symmetrized().is_symmetric(0.0));
    }

    #[test]
    fn entries_are_scoped_by_eos_name() {
        let table = InteractionTable::new().with_pair("PR", catalog::ETHANE, catalog::PROPANE, 0.05);
        let c = comps(&[catalog::ETHANE, catalog::PROPANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), None);
        assert_eq!(k.get(0, 1), 0.0);
    }

    #[test]
    fn methane_uses_solubility_parameter_gap() {
        let table = InteractionTable::new();
        let c = comps(&[catalog::METHANE, catalog::PROPANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), None);
        let expected = 0.014 * (6.40_f64 - 5.68).abs();
        assert!((k.get(0, 1) - expected).abs() < 1e-12);
        assert!((k.get(1, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn hydrogen_rule_needs_temperature() {
        let table = InteractionTable::new();
        let c = comps(&[catalog::HYDROGEN, catalog::PROPANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let without_t = resolve_interaction_matrix(&c, Some(scope), None);
        assert_eq!(without_t.get(0, 1), 0.0);

        let with_t = resolve_interaction_matrix(&c, Some(scope), Some(300.0));
        let tr = 300.0 / 33.19;
        let expected = 1.0 / (344.23 * (-0.48586_f64 * tr).exp() + 1.0);
        assert!((with_t.get(0, 1) - expected).abs() < 1e-12);
    }

    #[test]
    fn carbon_dioxide_constant_rule() {
        let table = InteractionTable::new();
        let c = comps(&[catalog::CARBON_DIOXIDE, catalog::N_BUTANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), None);
        assert_eq!(k.get(0, 1), 0.1);
    }

    #[test]
    fn unflagged_pair_defaults_to_zero() {
        let table = InteractionTable::new();
        let c = comps(&[catalog::ETHANE, catalog::N_BUTANE]);
        let scope = InteractionScope {
            table: &table,
            eos: "SRK",
        };
        let k = resolve_interaction_matrix(&c, Some(scope), Some(300.0));
        assert_eq!(k, InteractionMatrix::zeros(2));
    }

    #[test]
    fn from_rows_validates_shape_and_diagonal() {
        assert!(InteractionMatrix::from_rows(vec![vec![0.0, 0.1], vec![0.1]]).is_err());
        assert!(InteractionMatrix::from_rows(vec![vec![0.2, 0.1], vec![0.1, 0.0]]).is_err());
        let k = InteractionMatrix::from_rows(vec![vec![0.0, 0.1], vec![0.2, 0.0]]).unwrap();
        assert_eq!(k.size(), 2);
        assert_eq!(k.get(1, 0), 0.2);
    }

    #[test]
    fn records_round_trip_through_table() {
        let table = InteractionTable::new()
            .with_pair("SRK", catalog::ETHANE, catalog::PROPANE, 0.01)
            .with_pair("vdW", catalog::METHANE, catalog::ETHANE, -0.003);
        let rebuilt = InteractionTable::from(table.records());
        assert_eq!(rebuilt, table);
    }
}
