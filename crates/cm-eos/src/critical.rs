//! Mixture critical point from the Helmholtz-energy criticality conditions.
//!
//! At fixed temperature and total volume, with mole numbers nᵢ = xᵢ (one mole
//! of mixture), the critical point satisfies
//!
//! - det Q = 0, where Qᵢⱼ = ∂²A/∂nᵢ∂nⱼ, and
//! - C = Σᵢⱼₖ ∂³A/∂nᵢ∂nⱼ∂nₖ · uᵢuⱼuₖ = 0, with u the null direction of Q.
//!
//! The two conditions are solved for (T, V) with the Broyden solver from
//! `cm-solver`. Attraction uses aᵢⱼ = √(aᵢaⱼ)(1 − k̄ᵢⱼ) with k̄ the symmetric
//! part of the interaction matrix, which is the quadratic form of the classic
//! mixing rule.

use crate::error::{EosError, EosResult};
use crate::family::EosFamily;
use cm_core::constants::R;
use cm_core::{MolarVolume, Pressure, Temperature, m3_per_mol, pa};
use cm_fluids::{Component, Composition, InteractionMatrix};
use cm_solver::{BroydenConfig, SolverError, broyden_solve};
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use tracing::{debug, warn};

/// Options for the critical-point solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CriticalConfig {
    /// Initial temperature as a multiple of the mole-fraction-weighted Tc.
    ///
    /// The default 1.5 suits most hydrocarbon mixtures. When a solve ends in
    /// `CriticalPointConvergence`, retrying with a factor between 1.0 and 1.3
    /// usually converges (CO₂/propane with kᵢⱼ = 0.1 is one such case).
    pub seed_temperature_factor: f64,
    pub max_iterations: usize,
    /// Residual-norm tolerance on the dimensionless conditions.
    pub tolerance: f64,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            seed_temperature_factor: 1.5,
            max_iterations: 100,
            tolerance: 1e-10,
        }
    }
}

impl CriticalConfig {
    fn broyden(&self) -> BroydenConfig {
        BroydenConfig {
            max_iterations: self.max_iterations,
            abs_tol: self.tolerance,
            ..BroydenConfig::default()
        }
    }
}

/// Converged mixture critical point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalPoint {
    pub tc: Temperature,
    /// EOS pressure at (tc, vc).
    pub pc: Pressure,
    /// Solved critical volume.
    pub vc: MolarVolume,
    /// Σ xᵢVcᵢ from tabulated (or RTc/3Pc estimated) pure critical volumes.
    pub vc_corrected: MolarVolume,
    pub iterations: usize,
    pub residual_norm: f64,
}

/// Mole-number derivatives of the Helmholtz energy at one (T, V, n).
#[derive(Debug, Clone)]
struct HelmholtzTerms {
    soave: bool,
    rt: f64,
    volume: f64,
    n: Vec<f64>,
    b: Vec<f64>,
    aij: DMatrix<f64>,
    /// ∂(Σ nₖnₗaₖₗ)/∂nᵢ
    ap: Vec<f64>,
    b_mix: f64,
    a_mix: f64,
    n_total: f64,
}

impl HelmholtzTerms {
    fn new(
        family: EosFamily,
        a: &[f64],
        b: &[f64],
        kbar: &DMatrix<f64>,
        n: &[f64],
        temperature: f64,
        volume: f64,
    ) -> Self {
        let m = n.len();
        let aij = DMatrix::from_fn(m, m, |i, j| (a[i] * a[j]).sqrt() * (1.0 - kbar[(i, j)]));
        let ap = (0..m)
            .map(|i| 2.0 * (0..m).map(|k| n[k] * aij[(i, k)]).sum::<f64>())
            .collect();
        let b_mix = n.iter().zip(b).map(|(ni, bi)| ni * bi).sum();
        let mut a_mix = 0.0;
        for i in 0..m {
            for j in 0..m {
                a_mix += n[i] * n[j] * aij[(i, j)];
            }
        }
        Self {
            soave: family.is_soave_type(),
            rt: R * temperature,
            volume,
            n: n.to_vec(),
            b: b.to_vec(),
            aij,
            ap,
            b_mix,
            a_mix,
            n_total: n.iter().sum(),
        }
    }

    fn len(&self) -> usize {
        self.n.len()
    }

    /// B1ᵢⱼ and B2ᵢⱼ of the Soave attraction term.
    fn soave_b1_b2(&self, i: usize, j: usize) -> (f64, f64) {
        let (b, bm) = (&self.b, self.b_mix);
        let b1 = 2.0 * self.a_mix * b[i] * b[j] - bm * (self.ap[i] * b[j] + self.ap[j] * b[i]);
        let b2 = -b1 - 2.0 * self.aij[(i, j)] * bm * bm;
        (b1, b2)
    }

    fn q_matrix(&self) -> DMatrix<f64> {
        let m = self.len();
        let v = self.volume;
        let bm = self.b_mix;
        let w = v - bm;
        let s = v + bm;
        let log_term = (s / v).ln();

        DMatrix::from_fn(m, m, |i, j| {
            let (bi, bj) = (self.b[i], self.b[j]);
            let ideal = if i == j { 1.0 / self.n[i] } else { 0.0 };
            let repulsion =
                self.rt * (ideal + (bi + bj) / w + self.n_total * bi * bj / (w * w));
            let attraction = if self.soave {
                let (b1, b2) = self.soave_b1_b2(i, j);
                self.a_mix * bi * bj / (bm * s * s)
                    + b1 / (bm * bm * s)
                    + b2 * log_term / (bm * bm * bm)
            } else {
                -2.0 * self.aij[(i, j)] / v
            };
            repulsion + attraction
        })
    }

    /// ∂Qᵢⱼ/∂nₖ.
    fn third(&self, i: usize, j: usize, k: usize) -> f64 {
        let v = self.volume;
        let bm = self.b_mix;
        let w = v - bm;
        let s = v + bm;
        let (bi, bj, bk) = (self.b[i], self.b[j], self.b[k]);

        let ideal = if i == j && j == k {
            -1.0 / (self.n[i] * self.n[i])
        } else {
            0.0
        };
        let mut d = self.rt
            * (ideal
                + (bi * bj + bj * bk + bk * bi) / (w * w)
                + 2.0 * self.n_total * bi * bj * bk / (w * w * w));
        if !self.soave {
            return d;
        }

        let log_term = (s / v).ln();
        let bb = bi * bj;
        let (b1, b2) = self.soave_b1_b2(i, j);
        let db1 = 2.0 * self.ap[k] * bb
            - bk * (self.ap[i] * bj + self.ap[j] * bi)
            - 2.0 * bm * (self.aij[(i, k)] * bj + self.aij[(j, k)] * bi);
        let db2 = -db1 - 4.0 * self.aij[(i, j)] * bm * bk;

        let bm2 = bm * bm;
        let bm3 = bm2 * bm;
        d += self.ap[k] * bb / (bm * s * s)
            - self.a_mix * bb * bk / (bm2 * s * s)
            - 2.0 * self.a_mix * bb * bk / (bm * s * s * s);
        d += db1 / (bm2 * s) - 2.0 * b1 * bk / (bm3 * s) - b1 * bk / (bm2 * s * s);
        d += db2 * log_term / bm3 - 3.0 * b2 * bk * log_term / (bm3 * bm) + b2 * bk / (bm3 * s);
        d
    }

    /// Total Helmholtz energy up to terms linear in n.
    #[cfg(test)]
    fn helmholtz(&self) -> f64 {
        let ideal: f64 = self.n.iter().map(|ni| ni * ni.ln()).sum::<f64>() * self.rt;
        let repulsion = -self.n_total * self.rt * (self.volume - self.b_mix).ln();
        let attraction = if self.soave {
            -self.a_mix / self.b_mix * ((self.volume + self.b_mix) / self.volume).ln()
        } else {
            -self.a_mix / self.volume
        };
        ideal + repulsion + attraction
    }
}

/// C = Σᵢⱼₖ ∂³A/∂nᵢ∂nⱼ∂nₖ · uᵢuⱼuₖ.
///
/// Runs over i ≤ j ≤ k only; each unordered triple is weighted by its number
/// of distinct orderings (1, 3 or 6). This is the O(n³) part of each residual
/// evaluation.
fn contract_third_derivatives(terms: &HelmholtzTerms, u: &DVector<f64>) -> f64 {
    let m = terms.len();
    let mut sum = 0.0;
    for i in 0..m {
        for j in i..m {
            for k in j..m {
                let multiplicity = if i == j && j == k {
                    1.0
                } else if i == j || j == k {
                    3.0
                } else {
                    6.0
                };
                sum += multiplicity * terms.third(i, j, k) * u[i] * u[j] * u[k];
            }
        }
    }
    sum
}

/// Eigenvector of the eigenvalue closest to zero, largest entry positive.
fn null_direction(q: &DMatrix<f64>) -> DVector<f64> {
    let eigen = SymmetricEigen::new(q.clone());
    let idx = eigen.eigenvalues.iamin();
    let mut u = eigen.eigenvectors.column(idx).into_owned();
    if u[u.iamax()] < 0.0 {
        u.neg_mut();
    }
    u
}

/// The two-equation system for one composition.
struct CriticalProblem<'c> {
    family: EosFamily,
    components: Vec<&'c Component>,
    x: Vec<f64>,
    b: Vec<f64>,
    kbar: DMatrix<f64>,
    t0: f64,
    v0: f64,
}

impl CriticalProblem<'_> {
    fn terms(&self, temperature: f64, volume: f64) -> EosResult<HelmholtzTerms> {
        let a = self
            .components
            .iter()
            .map(|c| self.family.parameters(c, temperature).map(|p| p.a))
            .collect::<EosResult<Vec<_>>>()?;
        Ok(HelmholtzTerms::new(
            self.family,
            &a,
            &self.b,
            &self.kbar,
            &self.x,
            temperature,
            volume,
        ))
    }

    fn b_mix(&self) -> f64 {
        self.x.iter().zip(&self.b).map(|(x, b)| x * b).sum()
    }

    fn unscale(&self, y: &DVector<f64>) -> (f64, f64) {
        (y[0] * self.t0, y[1] * self.v0)
    }

    fn residuals(&self, y: &DVector<f64>) -> EosResult<DVector<f64>> {
        let (t, v) = self.unscale(y);
        let terms = self.terms(t, v)?;
        let q = terms.q_matrix();
        let det = (&q / terms.rt).determinant();
        let u = null_direction(&q);
        let c = contract_third_derivatives(&terms, &u) / terms.rt;
        Ok(DVector::from_vec(vec![det, c]))
    }
}

/// Every failed solve is `CriticalPointConvergence` except a rejected start.
/// A residual that cannot be evaluated at the seed has no residual norm.
fn solve_failure(err: SolverError) -> EosError {
    match err {
        SolverError::ConvergenceFailed {
            iterations,
            residual_norm,
            ..
        } => EosError::CriticalPointConvergence {
            iterations,
            residual: residual_norm,
        },
        SolverError::Numeric { .. } => EosError::CriticalPointConvergence {
            iterations: 0,
            residual: f64::NAN,
        },
        invalid @ SolverError::InvalidInput { .. } => EosError::Solver(invalid),
    }
}

/// Solve for the critical point of `composition` under `family`.
///
/// `kij` must be index-aligned with the composition. Components with zero
/// mole fraction are left out of the solve.
pub fn critical_point(
    family: EosFamily,
    composition: &Composition,
    kij: &InteractionMatrix,
    config: &CriticalConfig,
) -> EosResult<CriticalPoint> {
    let n = composition.len();
    if kij.size() != n {
        return Err(EosError::DimensionMismatch {
            what: "interaction matrix",
            expected: n,
            found: kij.size(),
        });
    }

    let active: Vec<usize> = (0..n).filter(|&i| composition.fractions()[i] > 0.0).collect();
    let components: Vec<&Component> = active.iter().map(|&i| &composition.components()[i]).collect();
    let x: Vec<f64> = active.iter().map(|&i| composition.fractions()[i]).collect();
    let kbar = DMatrix::from_fn(active.len(), active.len(), |p, q| {
        0.5 * (kij.get(active[p], active[q]) + kij.get(active[q], active[p]))
    });

    let mut tpc = 0.0;
    let mut v0 = 0.0;
    let mut vc_corrected = 0.0;
    for (c, xi) in components.iter().zip(&x) {
        let tc = c.critical_temperature()?;
        let pc = c.critical_pressure()?;
        let estimate = R * tc / (3.0 * pc);
        tpc += xi * tc;
        v0 += xi * estimate;
        vc_corrected += xi * c.vc.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(estimate);
    }
    let t0 = config.seed_temperature_factor * tpc;
    if !(t0.is_finite() && t0 > 0.0) {
        return Err(EosError::InvalidInput {
            what: format!("seed temperature must be positive, got {t0}"),
        });
    }

    let b = components
        .iter()
        .map(|c| family.parameters(c, t0).map(|p| p.b))
        .collect::<EosResult<Vec<_>>>()?;

    let problem = CriticalProblem {
        family,
        components,
        x,
        b,
        kbar,
        t0,
        v0,
    };
    let b_mix = problem.b_mix();
    debug!(family = %family, t0, v0, b_mix, "critical point seed");

    let residual_fn = |y: &DVector<f64>| {
        problem.residuals(y).map_err(|e| SolverError::Numeric {
            what: e.to_string(),
        })
    };
    let feasible_fn = |y: &DVector<f64>| {
        let (t, v) = problem.unscale(y);
        t > 0.0 && v > b_mix && t.is_finite() && v.is_finite()
    };

    let start = DVector::from_vec(vec![1.0, 1.0]);
    let solution = broyden_solve(start, residual_fn, feasible_fn, &config.broyden())
        .map_err(solve_failure)
        .inspect_err(|e| warn!(family = %family, error = %e, "critical point solve failed"))?;

    let (tc, vc) = problem.unscale(&solution.x);
    let terms = problem.terms(tc, vc)?;
    let pc = family.cubic_form(terms.a_mix, terms.b_mix).pressure(tc, vc);
    debug!(tc, vc, pc, iterations = solution.iterations, "critical point converged");

    Ok(CriticalPoint {
        tc: cm_core::k(tc),
        pc: pa(pc),
        vc: m3_per_mol(vc),
        vc_corrected: m3_per_mol(vc_corrected),
        iterations: solution.iterations,
        residual_norm: solution.residual_norm,
    })
}
