//! Polynomial model evaluation and fitting.
//!
//! The sweeper relies on two primitive operations:
//! - build a design matrix for a given degree (for OLS)
//! - predict `y` given coefficients (for losses/plots)
//!
//! A polynomial of degree `d` is a linear model over `[x^0, …, x^d]`; the
//! un-expanded baseline is the `d = 1` case.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;
use crate::math::{LinearSolver, expand_powers};

/// Coefficients for `[x^0, x^1, …, x^degree]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    pub degree: usize,
    pub coefficients: Vec<f64>,
}

impl PolynomialModel {
    /// Fit by ordinary least squares on the degree-expanded inputs.
    pub fn fit<S: LinearSolver + ?Sized>(
        xs: &[f64],
        ys: &[f64],
        degree: usize,
        solver: &S,
    ) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::invalid(format!(
                "Feature/target row mismatch: {} inputs vs {} targets.",
                xs.len(),
                ys.len()
            )));
        }
        let design = expand_powers(xs, degree);
        let target = DVector::from_column_slice(ys);
        let beta = solver.solve(&design, &target)?;
        Ok(Self {
            degree,
            coefficients: beta.iter().copied().collect(),
        })
    }

    /// Predict each row of a design matrix produced by `expand_powers` with this degree.
    pub fn predict_design(&self, design: &DMatrix<f64>) -> Vec<f64> {
        let beta = DVector::from_column_slice(&self.coefficients);
        (design * beta).iter().copied().collect()
    }

    /// Predict a batch of raw inputs.
    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        self.predict_design(&expand_powers(xs, self.degree))
    }

    /// Predict a single input (Horner's scheme).
    pub fn predict(&self, x: f64) -> f64 {
        predict(&self.coefficients, x)
    }
}

/// Evaluate `Σ c_k x^k`.
pub fn predict(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SvdSolver;

    #[test]
    fn predict_horner_matches_direct_sum() {
        let c = [2.0, 0.0, -1.0, 0.5];
        let x = 1.7_f64;
        let direct = 2.0 - x * x + 0.5 * x.powi(3);
        assert!((predict(&c, x) - direct).abs() < 1e-12);
    }

    #[test]
    fn fit_recovers_exact_quadratic() {
        let xs: Vec<f64> = (0..12).map(|i| -3.0 + 0.5 * i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 1.0 + 2.0 * x - 0.5 * x * x).collect();

        let model = PolynomialModel::fit(&xs, &ys, 2, &SvdSolver).unwrap();
        let expected = [1.0, 2.0, -0.5];
        for (a, b) in model.coefficients.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9, "coefficient {a} != {b}");
        }
        assert!((model.predict(2.0) - 3.0).abs() < 1e-9);
        let preds = model.predict_many(&xs);
        for (p, y) in preds.iter().zip(ys.iter()) {
            assert!((p - y).abs() < 1e-9);
        }
    }

    #[test]
    fn fit_rejects_mismatched_rows() {
        let err = PolynomialModel::fit(&[1.0, 2.0], &[1.0], 1, &SvdSolver).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
