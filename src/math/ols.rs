//! Ordinary least squares solver.
//!
//! The sweep repeatedly solves problems of the form:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD handles tall design matrices (more rows than columns) and rank-deficient
//!   ones alike. Singular values below `ε · max(n, p) · σ_max` are treated as zero,
//!   which yields the minimum-norm least-squares solution.
//! - Ill-conditioned systems are *not* rejected. Whatever coefficients the
//!   decomposition produces are returned, extreme or not.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// A capability that fits coefficients minimizing squared residuals.
///
/// The sweeper only depends on this trait, so alternative solvers (normal
/// equations, QR, iterative) can be swapped in.
pub trait LinearSolver {
    fn solve(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError>;
}

/// SVD-based least-squares solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvdSolver;

impl LinearSolver for SvdSolver {
    fn solve(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
        solve_least_squares(x, y)
    }
}

/// Solve a least squares problem using SVD.
///
/// Fails fast (exit code 2) when the row counts of `x` and `y` disagree or the
/// system has no rows or columns.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, AppError> {
    let (n, p) = x.shape();
    if n != y.len() {
        return Err(AppError::invalid(format!(
            "Shape mismatch: design matrix has {n} rows but target has {} entries.",
            y.len()
        )));
    }
    if n == 0 || p == 0 {
        return Err(AppError::invalid(format!(
            "Cannot solve an empty {n}x{p} least-squares system."
        )));
    }

    let svd = x.clone().svd(true, true);

    // ~= machine_epsilon * max(size) * max_singular
    let sigma_max = svd.singular_values.max();
    let eps = f64::EPSILON * n.max(p) as f64 * sigma_max;
    let eps = if eps.is_finite() { eps } else { 0.0 };

    svd.solve(y, eps)
        .map_err(|e| AppError::compute(format!("Least-squares solve failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_minimizes_residuals_on_noisy_rows() {
        // Points (0,0), (1,1), (2,1): OLS line is y = 1/6 + x/2.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 1.0]);

        let beta = SvdSolver.solve(&x, &y).unwrap();
        assert!((beta[0] - 1.0 / 6.0).abs() < 1e-10, "intercept {}", beta[0]);
        assert!((beta[1] - 0.5).abs() < 1e-10, "slope {}", beta[1]);
    }

    #[test]
    fn rank_deficient_system_still_returns_coefficients() {
        // Two identical columns: minimum-norm solution splits the weight evenly.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-9);
        assert!((beta[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_rows_fail_fast() {
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);

        let err = solve_least_squares(&x, &y).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
