//! Finite-difference Jacobians for small dense systems.
//!
//! Steps are relative: h = ε·max(|xⱼ|, 1), so unknowns scaled to order one
//! (as the critical-point solve does) see an absolute step of about ε.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};

#[inline]
fn step(xj: f64, epsilon: f64) -> f64 {
    epsilon * xj.abs().max(1.0)
}

fn shifted(x: &DVector<f64>, j: usize, h: f64) -> DVector<f64> {
    let mut xs = x.clone();
    xs[j] += h;
    xs
}

fn checked_column(column: DVector<f64>, j: usize) -> SolverResult<DVector<f64>> {
    if column.iter().all(|v| v.is_finite()) {
        Ok(column)
    } else {
        Err(SolverError::Numeric {
            what: format!("non-finite Jacobian column {j}"),
        })
    }
}

/// Forward-difference Jacobian, one extra evaluation per unknown.
pub fn finite_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let f_x = f(x)?;
    forward_with_base(x, &f_x, &f, epsilon)
}

/// Forward differences around an already evaluated f(x).
pub(crate) fn forward_with_base<F>(
    x: &DVector<f64>,
    f_x: &DVector<f64>,
    f: &F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut jac = DMatrix::zeros(f_x.len(), x.len());
    for j in 0..x.len() {
        let h = step(x[j], epsilon);
        let column = (f(&shifted(x, j, h))? - f_x) / h;
        jac.set_column(j, &checked_column(column, j)?);
    }
    Ok(jac)
}

/// Central-difference Jacobian. Second-order accurate, two evaluations per
/// unknown; used to check analytic derivatives.
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut jac: Option<DMatrix<f64>> = None;
    for j in 0..x.len() {
        let h = step(x[j], epsilon);
        let column = (f(&shifted(x, j, h))? - f(&shifted(x, j, -h))?) / (2.0 * h);
        let column = checked_column(column, j)?;
        jac.get_or_insert_with(|| DMatrix::zeros(column.len(), x.len()))
            .set_column(j, &column);
    }
    jac.ok_or_else(|| SolverError::InvalidInput {
        what: "Jacobian of an empty system".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_and_square(x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        Ok(DVector::from_vec(vec![x[0] * x[1], x[0] + x[1] * x[1]]))
    }

    #[test]
    fn forward_difference_of_linear_map_is_exact_enough() {
        let f = |x: &DVector<f64>| Ok(DVector::from_element(1, 2.0 * x[0]));
        let jac = finite_difference_jacobian(&DVector::from_element(1, 3.0), f, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn central_difference_two_by_two() {
        let x = DVector::from_vec(vec![2.0, 3.0]);
        let jac = central_difference_jacobian(&x, product_and_square, 1e-6).unwrap();

        assert!((jac[(0, 0)] - 3.0).abs() < 1e-6);
        assert!((jac[(0, 1)] - 2.0).abs() < 1e-6);
        assert!((jac[(1, 0)] - 1.0).abs() < 1e-6);
        assert!((jac[(1, 1)] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn forward_and_central_agree() {
        let x = DVector::from_vec(vec![0.7, -1.3]);
        let fwd = finite_difference_jacobian(&x, product_and_square, 1e-7).unwrap();
        let ctr = central_difference_jacobian(&x, product_and_square, 1e-5).unwrap();
        assert!((fwd - ctr).amax() < 1e-5);
    }

    #[test]
    fn non_finite_column_is_an_error() {
        let f = |x: &DVector<f64>| Ok(DVector::from_element(1, (x[0] - 1.0).ln()));
        // f(1) = -inf, so the forward column is infinite
        let err = finite_difference_jacobian(&DVector::from_element(1, 1.0), f, 1e-7).unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }

    #[test]
    fn empty_system_is_rejected_by_central_scheme() {
        let f = |_: &DVector<f64>| Ok(DVector::zeros(0));
        assert!(central_difference_jacobian(&DVector::zeros(0), f, 1e-6).is_err());
    }
}
