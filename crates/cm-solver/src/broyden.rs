//! Broyden quasi-Newton solver with backtracking and a feasibility guard.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::forward_with_base;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, trace};

/// Broyden solver configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BroydenConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm (against the starting residual)
    pub rel_tol: f64,
    /// Relative step used for finite-difference Jacobians
    pub fd_epsilon: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for BroydenConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            abs_tol: 1e-10,
            rel_tol: 1e-12,
            fd_epsilon: 1e-7,
            line_search_beta: 0.5,
            max_line_search_iters: 30,
        }
    }
}

/// Broyden iteration result.
#[derive(Debug, Clone)]
pub struct BroydenResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Number of finite-difference Jacobian evaluations
    pub jacobian_refreshes: usize,
}

/// Solve `residual_fn(x) = 0` starting from `x0`.
///
/// Trial points rejected by `feasible_fn` are never passed to `residual_fn`;
/// the step is shortened instead. When backtracking cannot reduce the residual
/// the Broyden matrix is replaced by a fresh finite-difference Jacobian and the
/// step is retried once before giving up.
///
/// Only a bad start (empty, infeasible, mismatched sizes or a failing first
/// evaluation) is reported as `InvalidInput` or `Numeric`. Once iterating,
/// every failure, including a singular fresh Jacobian or an error from
/// `residual_fn`, is `ConvergenceFailed` with the last accepted residual.
pub fn broyden_solve<F, G>(
    x0: DVector<f64>,
    residual_fn: F,
    feasible_fn: G,
    config: &BroydenConfig,
) -> SolverResult<BroydenResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    G: Fn(&DVector<f64>) -> bool,
{
    if x0.is_empty() {
        return Err(SolverError::InvalidInput {
            what: "empty unknown vector".to_string(),
        });
    }
    if !feasible_fn(&x0) {
        return Err(SolverError::InvalidInput {
            what: "starting point is infeasible".to_string(),
        });
    }

    let mut x = x0;
    let mut r = residual_fn(&x)?;
    if r.len() != x.len() {
        return Err(SolverError::InvalidInput {
            what: format!("{} residuals for {} unknowns", r.len(), x.len()),
        });
    }
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    let mut jac = forward_with_base(&x, &r, &residual_fn, config.fd_epsilon)?;
    let mut refreshes = 1;
    let mut fresh = true;

    if !r_norm.is_finite() {
        return Err(SolverError::Numeric {
            what: "non-finite residual at the starting point".to_string(),
        });
    }

    for iter in 0..config.max_iterations {
        let stalled = move |cause: SolverError| stalled_at(iter, r_norm, cause);
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            debug!(iterations = iter, residual = r_norm, "Broyden converged");
            return Ok(BroydenResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
                jacobian_refreshes: refreshes,
            });
        }

        let Some(dx) = jac.clone().lu().solve(&(-&r)) else {
            if fresh {
                return Err(SolverError::ConvergenceFailed {
                    what: "singular Jacobian".to_string(),
                    iterations: iter,
                    residual_norm: r_norm,
                });
            }
            jac = forward_with_base(&x, &r, &residual_fn, config.fd_epsilon).map_err(stalled)?;
            refreshes += 1;
            fresh = true;
            continue;
        };

        match line_search(&x, &dx, r_norm, &residual_fn, &feasible_fn, config).map_err(stalled)? {
            Some((x_new, r_new)) => {
                let s = &x_new - &x;
                let y = &r_new - &r;
                broyden_update(&mut jac, &s, &y);

                x = x_new;
                r = r_new;
                r_norm = r.norm();
                fresh = false;
                trace!(iteration = iter, residual = r_norm, "Broyden step");
            }
            None if !fresh => {
                debug!(iteration = iter, "Broyden step stalled, refreshing Jacobian");
                jac = forward_with_base(&x, &r, &residual_fn, config.fd_epsilon).map_err(stalled)?;
                refreshes += 1;
                fresh = true;
            }
            None => {
                return Err(SolverError::ConvergenceFailed {
                    what: "line search stagnated".to_string(),
                    iterations: iter,
                    residual_norm: r_norm,
                });
            }
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!("maximum iterations {} reached", config.max_iterations),
        iterations: config.max_iterations,
        residual_norm: r_norm,
    })
}

fn stalled_at(iterations: usize, residual_norm: f64, cause: SolverError) -> SolverError {
    match cause {
        SolverError::ConvergenceFailed { .. } => cause,
        SolverError::InvalidInput { what } | SolverError::Numeric { what } => {
            SolverError::ConvergenceFailed {
                what,
                iterations,
                residual_norm,
            }
        }
    }
}

/// Backtrack along `dx` until a feasible point reduces the residual norm.
fn line_search<F, G>(
    x: &DVector<f64>,
    dx: &DVector<f64>,
    r_norm: f64,
    residual_fn: &F,
    feasible_fn: &G,
    config: &BroydenConfig,
) -> SolverResult<Option<(DVector<f64>, DVector<f64>)>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    G: Fn(&DVector<f64>) -> bool,
{
    let mut alpha = 1.0;
    for _ in 0..config.max_line_search_iters {
        let x_new = x + alpha * dx;
        if feasible_fn(&x_new) {
            let r_new = residual_fn(&x_new)?;
            let n = r_new.norm();
            if n.is_finite() && n < r_norm {
                return Ok(Some((x_new, r_new)));
            }
        }
        alpha *= config.line_search_beta;
    }
    Ok(None)
}

/// "Good" Broyden rank-one update: J += (y - J s) sᵀ / (sᵀ s).
fn broyden_update(jac: &mut DMatrix<f64>, s: &DVector<f64>, y: &DVector<f64>) {
    let ss = s.dot(s);
    if ss <= 0.0 || !ss.is_finite() {
        return;
    }
    let defect = y - &*jac * s;
    *jac += (defect / ss) * s.transpose();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };

        let x0 = DVector::from_element(1, 3.0);
        let result = broyden_solve(x0, residual, |x| x[0] > 0.0, &BroydenConfig::default())
            .unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-9);
        assert!(result.residual_norm < 1e-10);
    }

    #[test]
    fn two_by_two_system() {
        // x0^2 + x1^2 = 4, x0 * x1 = 1, both positive
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                x[0] * x[0] + x[1] * x[1] - 4.0,
                x[0] * x[1] - 1.0,
            ]))
        };
        let feasible = |x: &DVector<f64>| x.iter().all(|v| *v > 0.0);

        let x0 = DVector::from_vec(vec![2.0, 0.6]);
        let result = broyden_solve(x0, residual, feasible, &BroydenConfig::default()).unwrap();

        let (a, b) = (result.x[0], result.x[1]);
        assert!((a * a + b * b - 4.0).abs() < 1e-8);
        assert!((a * b - 1.0).abs() < 1e-8);
    }

    #[test]
    fn infeasible_points_are_never_evaluated() {
        // ln(x) = 0 with a start that would overshoot into x <= 0 on a full step
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            assert!(x[0] > 0.0, "residual evaluated at infeasible point");
            Ok(DVector::from_element(1, x[0].ln()))
        };

        let x0 = DVector::from_element(1, 8.0);
        let result = broyden_solve(x0, residual, |x| x[0] > 0.0, &BroydenConfig::default())
            .unwrap();
        assert!((result.x[0] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn infeasible_start_is_rejected() {
        let residual =
            |x: &DVector<f64>| -> SolverResult<DVector<f64>> { Ok(DVector::from_element(1, x[0])) };
        let err = broyden_solve(
            DVector::from_element(1, -1.0),
            residual,
            |x| x[0] > 0.0,
            &BroydenConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::InvalidInput { .. }));
    }

    #[test]
    fn singular_jacobian_is_a_convergence_failure() {
        // Both equations constrain only x0 + x1
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            let s = x[0] + x[1] - 2.0;
            Ok(DVector::from_vec(vec![s, 2.0 * s]))
        };
        let err = broyden_solve(
            DVector::from_vec(vec![0.0, 0.0]),
            residual,
            |_| true,
            &BroydenConfig::default(),
        )
        .unwrap_err();
        match err {
            SolverError::ConvergenceFailed {
                iterations,
                residual_norm,
                ..
            } => {
                assert_eq!(iterations, 0);
                assert!((residual_norm - 20.0_f64.sqrt()).abs() < 1e-12);
            }
            other => panic!("expected convergence failure, got {other:?}"),
        }
    }

    #[test]
    fn residual_errors_after_the_start_are_convergence_failures() {
        // Fails once the iterate moves far from the start
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] < 2.5 {
                return Err(SolverError::Numeric {
                    what: "out of range".to_string(),
                });
            }
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let err = broyden_solve(
            DVector::from_element(1, 3.0),
            residual,
            |_| true,
            &BroydenConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SolverError::ConvergenceFailed { ref what, .. } if what == "out of range"));
    }

    #[test]
    fn no_root_reports_convergence_failure() {
        // x^2 + 1 has no real root
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] + 1.0))
        };
        let config = BroydenConfig {
            max_iterations: 20,
            ..BroydenConfig::default()
        };
        let err = broyden_solve(DVector::from_element(1, 1.0), residual, |_| true, &config)
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConvergenceFailed { .. } | SolverError::Numeric { .. }
        ));
    }
}
