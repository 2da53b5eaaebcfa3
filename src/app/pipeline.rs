//! Shared experiment pipelines used by the CLI and the integration tests.
//!
//! Keeping this in one place avoids duplicating the core workflows:
//! - descent: seed -> linear data -> loss surface -> gradient descent -> predictions
//! - sweep: seed -> quintic data -> train/test split -> per-degree fits -> selection
//! - contour: axes -> bowl field
//!
//! Front-ends can then focus on presentation (printing, plots, exports).

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::data::{linear_dataset, polynomial_dataset};
use crate::domain::{
    Dataset, DescentConfig, LinearDataConfig, LossSurface, ParamPair, PolynomialDataConfig,
    ScalarField, SurfaceConfig, SweepConfig, SweepResult, TrainTestSplit, Trajectory,
};
use crate::error::AppError;
use crate::fit::{bowl, evaluate_field, half_sse, inclusive_steps, loss_surface_from_config, run_descent, run_sweep};
use crate::math::{SvdSolver, mean_squared_error, r2_score};

/// Inputs of one descent experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescentRunConfig {
    pub seed: u64,
    pub data: LinearDataConfig,
    pub descent: DescentConfig,
    pub surface: SurfaceConfig,
}

impl Default for DescentRunConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            data: LinearDataConfig::default(),
            descent: DescentConfig::default(),
            surface: SurfaceConfig::default(),
        }
    }
}

/// All computed outputs of a single `rlab descent` run.
#[derive(Debug, Clone, Serialize)]
pub struct DescentRun {
    pub config: DescentRunConfig,
    pub dataset: Dataset,
    pub surface: LossSurface,
    pub trajectory: Trajectory,
    pub final_params: ParamPair,
    pub final_half_sse: f64,
    pub final_mse: f64,
    /// `ŷ` for each dataset point under the final parameters.
    pub predictions: Vec<f64>,
}

/// Generate the linear dataset from the seed and run the descent pipeline.
pub fn run_descent_experiment(config: &DescentRunConfig) -> Result<DescentRun, AppError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let dataset = linear_dataset(&config.data, &mut rng)?;
    run_descent_with_dataset(config, dataset)
}

/// Execute the descent pipeline with a pre-built dataset.
pub fn run_descent_with_dataset(config: &DescentRunConfig, dataset: Dataset) -> Result<DescentRun, AppError> {
    let surface = loss_surface_from_config(&dataset, &config.surface)?;
    let trajectory = run_descent(&dataset, &config.descent)?;
    let final_params = trajectory.last();

    let predictions: Vec<f64> = dataset
        .points()
        .iter()
        .map(|p| final_params.predict(p.x))
        .collect();
    let final_half_sse = half_sse(&dataset, final_params.bias, final_params.weight);
    let final_mse = mean_squared_error(&dataset.ys(), &predictions)?;

    info!(
        "descent finished: b={:.4} w={:.4} after {} iterations",
        final_params.bias,
        final_params.weight,
        trajectory.iterations()
    );

    Ok(DescentRun {
        config: config.clone(),
        dataset,
        surface,
        trajectory,
        final_params,
        final_half_sse,
        final_mse,
        predictions,
    })
}

/// Inputs of one sweep experiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRunConfig {
    pub seed: u64,
    pub data: PolynomialDataConfig,
    pub sweep: SweepConfig,
}

impl Default for SweepRunConfig {
    fn default() -> Self {
        Self {
            seed: 5,
            data: PolynomialDataConfig::default(),
            sweep: SweepConfig::default(),
        }
    }
}

/// All computed outputs of a single `rlab sweep` run.
#[derive(Debug, Clone, Serialize)]
pub struct SweepRun {
    pub config: SweepRunConfig,
    pub dataset: Dataset,
    pub split: TrainTestSplit,
    pub sweep: SweepResult,
    pub best_train_r2: f64,
    pub best_test_r2: f64,
}

/// Generate the quintic dataset from the seed and run the sweep pipeline.
pub fn run_sweep_experiment(config: &SweepRunConfig) -> Result<SweepRun, AppError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let dataset = polynomial_dataset(&config.data, &mut rng)?;
    run_sweep_with_dataset(config, dataset)
}

/// Execute the sweep pipeline with a pre-built dataset.
pub fn run_sweep_with_dataset(config: &SweepRunConfig, dataset: Dataset) -> Result<SweepRun, AppError> {
    let split = dataset.split(config.sweep.n_train, config.sweep.n_test)?;
    let sweep = run_sweep(&split, &config.sweep, &SvdSolver)?;

    let best = sweep.best();
    let best_train_r2 = r2_score(&split.train.ys(), &best.train_predictions)?;
    let best_test_r2 = r2_score(&split.test.ys(), &best.test_predictions)?;

    Ok(SweepRun {
        config: *config,
        dataset,
        split,
        sweep,
        best_train_r2,
        best_test_r2,
    })
}

/// Outputs of the contour demo.
#[derive(Debug, Clone, Serialize)]
pub struct ContourRun {
    pub center: (f64, f64),
    pub field: ScalarField,
}

/// Evaluate the bowl centred at `center` on the integer grid `lo..=hi` in both axes.
pub fn run_contour(center: (f64, f64), lo: i64, hi: i64) -> Result<ContourRun, AppError> {
    let axis = inclusive_steps(lo, hi)?;
    let field = evaluate_field(&axis, &axis, bowl(center))?;
    Ok(ContourRun { center, field })
}
