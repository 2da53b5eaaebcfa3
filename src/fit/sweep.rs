//! Polynomial-degree sweep.
//!
//! For every degree in `[degree_min, degree_max]` we fit an independent OLS model
//! on the degree-expanded training inputs, then score it on train and test:
//!
//! - `train_loss`, `test_loss`: mean squared error
//! - `average_loss = (train_loss + test_loss) / 2`
//!
//! Selection rule: walk the degrees in ascending order and keep the first one whose
//! average loss is strictly lower than the best seen so far. Ties therefore go to
//! the lowest degree. A NaN average never compares lower, so a NaN first degree
//! stays selected and the degenerate result is reported as-is.
//!
//! Degree fits do not share state, so they run in parallel; selection happens
//! afterwards on the ordered results and does not depend on scheduling.

use log::{debug, info};
use rayon::prelude::*;

use crate::domain::{DegreeResult, LinearBaseline, SweepConfig, SweepResult, TrainTestSplit};
use crate::error::AppError;
use crate::math::{LinearSolver, expand_powers, mean_squared_error, r2_score};
use crate::models::PolynomialModel;

/// Fit and score a single degree.
pub fn fit_degree<S: LinearSolver + ?Sized>(
    split: &TrainTestSplit,
    degree: usize,
    solver: &S,
) -> Result<DegreeResult, AppError> {
    let train_x = split.train.xs();
    let train_y = split.train.ys();
    let test_x = split.test.xs();
    let test_y = split.test.ys();

    let model = PolynomialModel::fit(&train_x, &train_y, degree, solver)?;

    let train_predictions = model.predict_design(&expand_powers(&train_x, degree));
    let test_predictions = model.predict_design(&expand_powers(&test_x, degree));

    let train_loss = mean_squared_error(&train_y, &train_predictions)?;
    let test_loss = mean_squared_error(&test_y, &test_predictions)?;
    let average_loss = (train_loss + test_loss) / 2.0;

    debug!("degree {degree}: train={train_loss:.4} test={test_loss:.4} avg={average_loss:.4}");

    Ok(DegreeResult {
        degree,
        train_loss,
        test_loss,
        average_loss,
        coefficients: model.coefficients,
        train_predictions,
        test_predictions,
    })
}

/// Fit the un-expanded `[1, x]` comparison model.
pub fn fit_baseline<S: LinearSolver + ?Sized>(
    split: &TrainTestSplit,
    solver: &S,
) -> Result<LinearBaseline, AppError> {
    let train_y = split.train.ys();
    let test_y = split.test.ys();
    let fit = fit_degree(split, 1, solver)?;

    Ok(LinearBaseline {
        train_r2: r2_score(&train_y, &fit.train_predictions)?,
        test_r2: r2_score(&test_y, &fit.test_predictions)?,
        coefficients: fit.coefficients,
        train_loss: fit.train_loss,
        test_loss: fit.test_loss,
        train_predictions: fit.train_predictions,
        test_predictions: fit.test_predictions,
    })
}

/// Index of the lowest average loss, first occurrence wins.
pub fn select_best(results: &[DegreeResult]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, r) in results.iter().enumerate() {
        if best.is_none_or(|(_, b)| r.average_loss < b) {
            best = Some((idx, r.average_loss));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Run the full sweep over `config.degree_min..=config.degree_max`.
///
/// `split` must be the train/test partition described by `config`; its sizes are
/// checked against `n_train` / `n_test`.
pub fn run_sweep<S: LinearSolver + Sync + ?Sized>(
    split: &TrainTestSplit,
    config: &SweepConfig,
    solver: &S,
) -> Result<SweepResult, AppError> {
    config.validate()?;
    if split.train.len() != config.n_train || split.test.len() != config.n_test {
        return Err(AppError::invalid(format!(
            "Split sizes (train={}, test={}) do not match config (train={}, test={}).",
            split.train.len(),
            split.test.len(),
            config.n_train,
            config.n_test
        )));
    }

    let degrees: Vec<usize> = (config.degree_min..=config.degree_max).collect();
    let results: Vec<DegreeResult> = degrees
        .par_iter()
        .map(|&d| fit_degree(split, d, solver))
        .collect::<Result<_, _>>()?;

    let best_index = select_best(&results)
        .ok_or_else(|| AppError::compute("Sweep produced no degree results."))?;

    let baseline = fit_baseline(split, solver)?;

    let best = &results[best_index];
    info!(
        "sweep over degrees {}..={}: best degree {} (avg loss {:.4})",
        config.degree_min, config.degree_max, best.degree, best.average_loss
    );

    Ok(SweepResult {
        results,
        best_index,
        baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Dataset;
    use crate::math::SvdSolver;

    fn record(degree: usize, average_loss: f64) -> DegreeResult {
        DegreeResult {
            degree,
            train_loss: average_loss,
            test_loss: average_loss,
            average_loss,
            coefficients: vec![],
            train_predictions: vec![],
            test_predictions: vec![],
        }
    }

    fn exact_quadratic_split() -> TrainTestSplit {
        let xs: Vec<f64> = (0..40).map(|i| -3.0 + 0.15 * i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 1.0 + 2.0 * x - 0.5 * x * x).collect();
        Dataset::from_columns(&xs, &ys).unwrap().split(25, 15).unwrap()
    }

    #[test]
    fn select_best_prefers_lowest_degree_on_ties() {
        let results = vec![record(2, 3.0), record(3, 1.0), record(4, 1.0), record(5, 2.0)];
        assert_eq!(select_best(&results), Some(1));
    }

    #[test]
    fn select_best_keeps_nan_first_degree() {
        let results = vec![record(2, f64::NAN), record(3, 5.0), record(4, f64::NAN)];
        assert_eq!(select_best(&results), Some(0));
        assert_eq!(select_best(&[record(2, f64::NAN), record(3, 5.0)]), Some(0));
        assert_eq!(select_best(&[]), None);
    }

    #[test]
    fn select_best_ignores_later_nan() {
        let results = vec![record(2, 7.0), record(3, f64::NAN), record(4, 6.0)];
        assert_eq!(select_best(&results), Some(2));
    }

    #[test]
    fn exact_quadratic_selects_true_degree() {
        let split = exact_quadratic_split();
        let cfg = SweepConfig {
            n_train: 25,
            n_test: 15,
            degree_min: 0,
            degree_max: 2,
        };
        let sweep = run_sweep(&split, &cfg, &SvdSolver).unwrap();

        assert_eq!(sweep.results.len(), 3);
        let degrees: Vec<usize> = sweep.results.iter().map(|r| r.degree).collect();
        assert_eq!(degrees, vec![0, 1, 2]);
        assert_eq!(sweep.best().degree, 2);
        assert!(sweep.best().average_loss < 1e-12);
        assert_eq!(sweep.best().coefficients.len(), 3);
    }

    #[test]
    fn exact_quadratic_wider_range_still_selects_true_degree() {
        let split = exact_quadratic_split();
        let cfg = SweepConfig {
            n_train: 25,
            n_test: 15,
            degree_min: 1,
            degree_max: 6,
        };
        let sweep = run_sweep(&split, &cfg, &SvdSolver).unwrap();

        assert_eq!(sweep.results.len(), cfg.degree_count());
        assert_eq!(sweep.best().degree, 2);
        assert!(sweep.best().average_loss < 1e-12);
        // Degree 1 cannot represent curvature.
        assert!(sweep.get(1).unwrap().average_loss > 0.1);
    }

    #[test]
    fn baseline_is_independent_linear_fit() {
        let split = exact_quadratic_split();
        let baseline = fit_baseline(&split, &SvdSolver).unwrap();
        assert_eq!(baseline.coefficients.len(), 2);
        assert_eq!(baseline.train_predictions.len(), 25);
        assert_eq!(baseline.test_predictions.len(), 15);
        assert!(baseline.train_loss > 0.0);
        assert!(baseline.train_r2 < 1.0);
    }

    #[test]
    fn mismatched_split_fails_fast() {
        let split = exact_quadratic_split();
        let cfg = SweepConfig {
            n_train: 30,
            n_test: 10,
            degree_min: 1,
            degree_max: 2,
        };
        assert_eq!(run_sweep(&split, &cfg, &SvdSolver).unwrap_err().exit_code(), 2);
    }
}
