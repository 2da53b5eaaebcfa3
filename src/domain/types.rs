//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced once by the numeric cores and read by plots/reports
//! - exported to JSON/CSV
//! - compared across runs in tests

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One `(x, y)` observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

/// An ordered, non-empty, fixed-size set of observations.
///
/// Datasets are generated once and never mutated by the optimizer, the surface
/// evaluator or the sweeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<Sample>,
}

impl Dataset {
    pub fn new(points: Vec<Sample>) -> Result<Self, AppError> {
        if points.is_empty() {
            return Err(AppError::insufficient("Dataset is empty."));
        }
        Ok(Self { points })
    }

    /// Build a dataset from parallel `x` / `y` columns.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::invalid(format!(
                "Column length mismatch: {} x values vs {} y values.",
                xs.len(),
                ys.len()
            )));
        }
        let points = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| Sample { x, y })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; construction rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Split into the first `n_train` rows and the last `n_test` rows.
    ///
    /// The two halves never overlap: `n_train + n_test` must not exceed the
    /// dataset length. Rows in between (if any) are left out of both.
    pub fn split(&self, n_train: usize, n_test: usize) -> Result<TrainTestSplit, AppError> {
        if n_train == 0 || n_test == 0 {
            return Err(AppError::insufficient(format!(
                "Train and test splits must be non-empty (train={n_train}, test={n_test})."
            )));
        }
        let n = self.len();
        if n_train.checked_add(n_test).is_none_or(|total| total > n) {
            return Err(AppError::invalid(format!(
                "Split train={n_train} + test={n_test} exceeds dataset size {n}."
            )));
        }
        let train = Dataset::new(self.points[..n_train].to_vec())?;
        let test = Dataset::new(self.points[n - n_test..].to_vec())?;
        Ok(TrainTestSplit { train, test })
    }
}

/// A fixed train/test partition of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub train: Dataset,
    pub test: Dataset,
}

/// Bias/weight of the linear predictor `ŷ = w·x + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamPair {
    pub bias: f64,
    pub weight: f64,
}

impl ParamPair {
    pub const ORIGIN: ParamPair = ParamPair {
        bias: 0.0,
        weight: 0.0,
    };

    pub fn new(bias: f64, weight: f64) -> Self {
        Self { bias, weight }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.weight * x + self.bias
    }

    pub fn is_finite(&self) -> bool {
        self.bias.is_finite() && self.weight.is_finite()
    }
}

/// Append-only history of parameter snapshots.
///
/// `steps()[0]` is the initial state; every descent iteration appends exactly
/// one post-update snapshot, so a finished run has `iterations + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    steps: Vec<ParamPair>,
}

impl Trajectory {
    pub fn new(initial: ParamPair) -> Self {
        Self {
            steps: vec![initial],
        }
    }

    pub(crate) fn with_capacity(initial: ParamPair, iterations: usize) -> Self {
        let mut steps = Vec::with_capacity(iterations.saturating_add(1));
        steps.push(initial);
        Self { steps }
    }

    pub(crate) fn push(&mut self, params: ParamPair) {
        self.steps.push(params);
    }

    pub fn steps(&self) -> &[ParamPair] {
        &self.steps
    }

    /// Number of completed iterations (`steps().len() - 1`).
    pub fn iterations(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn initial(&self) -> ParamPair {
        self.steps[0]
    }

    pub fn last(&self) -> ParamPair {
        self.steps[self.steps.len() - 1]
    }

    /// `true` if any snapshot overflowed to an infinite or NaN value.
    pub fn is_divergent(&self) -> bool {
        self.steps.iter().any(|p| !p.is_finite())
    }
}

/// A scalar function evaluated over a rectangular grid.
///
/// Values are stored row-major: `get(i, j)` is the value at
/// `(row_values[i], col_values[j])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    row_values: Vec<f64>,
    col_values: Vec<f64>,
    values: Vec<f64>,
}

impl ScalarField {
    pub(crate) fn from_parts(row_values: Vec<f64>, col_values: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), row_values.len() * col_values.len());
        Self {
            row_values,
            col_values,
            values,
        }
    }

    pub fn rows(&self) -> usize {
        self.row_values.len()
    }

    pub fn cols(&self) -> usize {
        self.col_values.len()
    }

    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    pub fn col_values(&self) -> &[f64] {
        &self.col_values
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.col_values.len() + j]
    }

    /// Finite value range, ignoring NaN/inf cells.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in self.values.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }

    /// Index of the smallest finite cell; ties resolve to the first in row-major order.
    pub fn min_cell(&self) -> Option<(usize, usize)> {
        let cols = self.col_values.len();
        let mut best: Option<(usize, f64)> = None;
        for (idx, &v) in self.values.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            if best.is_none_or(|(_, b)| v < b) {
                best = Some((idx, v));
            }
        }
        best.map(|(idx, _)| (idx / cols, idx % cols))
    }
}

/// Summed half squared error over a grid of `(bias, weight)` candidates.
///
/// Axis order: rows are bias candidates, columns are weight candidates, so
/// `loss(i, j)` is `Σ ½(w_j·x + b_i − y)²`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossSurface {
    field: ScalarField,
}

impl LossSurface {
    pub(crate) fn new(field: ScalarField) -> Self {
        Self { field }
    }

    pub fn bias_candidates(&self) -> &[f64] {
        self.field.row_values()
    }

    pub fn weight_candidates(&self) -> &[f64] {
        self.field.col_values()
    }

    pub fn loss(&self, bias_idx: usize, weight_idx: usize) -> f64 {
        self.field.get(bias_idx, weight_idx)
    }

    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Grid point with the lowest loss.
    pub fn argmin(&self) -> Option<ParamPair> {
        self.field.min_cell().map(|(i, j)| ParamPair {
            bias: self.field.row_values()[i],
            weight: self.field.col_values()[j],
        })
    }
}

/// Outcome of fitting one polynomial degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeResult {
    pub degree: usize,
    pub train_loss: f64,
    pub test_loss: f64,
    pub average_loss: f64,
    /// Coefficients for `[x^0, x^1, …, x^degree]`.
    pub coefficients: Vec<f64>,
    pub train_predictions: Vec<f64>,
    pub test_predictions: Vec<f64>,
}

/// Un-expanded `[1, x]` fit kept for comparison plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearBaseline {
    /// `[intercept, slope]`.
    pub coefficients: Vec<f64>,
    pub train_loss: f64,
    pub test_loss: f64,
    pub train_r2: f64,
    pub test_r2: f64,
    pub train_predictions: Vec<f64>,
    pub test_predictions: Vec<f64>,
}

/// Full sweep output: per-degree records in ascending degree order, the index
/// of the selected degree, and the baseline fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub results: Vec<DegreeResult>,
    pub best_index: usize,
    pub baseline: LinearBaseline,
}

impl SweepResult {
    pub fn best(&self) -> &DegreeResult {
        &self.results[self.best_index]
    }

    pub fn get(&self, degree: usize) -> Option<&DegreeResult> {
        self.results.iter().find(|r| r.degree == degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_columns_rejects_mismatch() {
        let err = Dataset::from_columns(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let err = Dataset::new(Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn split_takes_head_and_tail() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let data = Dataset::from_columns(&xs, &xs).unwrap();
        let split = data.split(6, 3).unwrap();
        assert_eq!(split.train.xs(), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(split.test.xs(), vec![7.0, 8.0, 9.0]);

        assert_eq!(data.split(8, 3).unwrap_err().exit_code(), 2);
        assert_eq!(data.split(0, 3).unwrap_err().exit_code(), 3);
        assert_eq!(data.split(usize::MAX, 1).unwrap_err().exit_code(), 2);
        assert_eq!(data.split(1, usize::MAX).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn min_cell_skips_nan_and_prefers_first() {
        let field = ScalarField::from_parts(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![f64::NAN, 2.0, 1.0, 1.0],
        );
        assert_eq!(field.min_cell(), Some((1, 0)));
        assert_eq!(field.finite_range(), Some((1.0, 2.0)));
    }

    #[test]
    fn trajectory_tracks_initial_and_last() {
        let mut t = Trajectory::new(ParamPair::ORIGIN);
        t.push(ParamPair::new(1.0, 2.0));
        assert_eq!(t.iterations(), 1);
        assert_eq!(t.initial(), ParamPair::ORIGIN);
        assert_eq!(t.last(), ParamPair::new(1.0, 2.0));
        assert!(!t.is_divergent());
        t.push(ParamPair::new(f64::INFINITY, 0.0));
        assert!(t.is_divergent());
    }
}
