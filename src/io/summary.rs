//! JSON run summaries.
//!
//! A summary is the portable record of one run: the configuration that produced
//! it and the headline numbers. Full arrays (surfaces, predictions) are left to the
//! CSV/SVG outputs.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::app::pipeline::{DescentRun, DescentRunConfig, SweepRun, SweepRunConfig};
use crate::domain::{DegreeResult, ParamPair};
use crate::error::AppError;

/// Summary of one `rlab descent` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescentSummary {
    pub tool: String,
    pub generated_at: String,
    pub config: DescentRunConfig,
    pub final_params: ParamPair,
    pub final_half_sse: f64,
    pub final_mse: f64,
    pub trajectory_len: usize,
    pub diverged: bool,
    /// Best cell of the evaluated loss surface, if any cell was finite.
    pub surface_argmin: Option<ParamPair>,
}

impl DescentSummary {
    pub fn from_run(run: &DescentRun) -> Self {
        Self {
            tool: "rlab".to_string(),
            generated_at: Local::now().to_rfc3339(),
            config: run.config.clone(),
            final_params: run.final_params,
            final_half_sse: run.final_half_sse,
            final_mse: run.final_mse,
            trajectory_len: run.trajectory.steps().len(),
            diverged: run.trajectory.is_divergent(),
            surface_argmin: run.surface.argmin(),
        }
    }
}

/// Per-degree losses as they appear in a sweep summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeLoss {
    pub degree: usize,
    pub train_loss: f64,
    pub test_loss: f64,
    pub average_loss: f64,
}

impl From<&DegreeResult> for DegreeLoss {
    fn from(r: &DegreeResult) -> Self {
        Self {
            degree: r.degree,
            train_loss: r.train_loss,
            test_loss: r.test_loss,
            average_loss: r.average_loss,
        }
    }
}

/// Summary of one `rlab sweep` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub tool: String,
    pub generated_at: String,
    pub config: SweepRunConfig,
    pub degrees: Vec<DegreeLoss>,
    pub best_degree: usize,
    pub best_coefficients: Vec<f64>,
    pub best_train_r2: f64,
    pub best_test_r2: f64,
    pub baseline_coefficients: Vec<f64>,
    pub baseline_train_loss: f64,
    pub baseline_test_loss: f64,
}

impl SweepSummary {
    pub fn from_run(run: &SweepRun) -> Self {
        let best = run.sweep.best();
        let base = &run.sweep.baseline;
        Self {
            tool: "rlab".to_string(),
            generated_at: Local::now().to_rfc3339(),
            config: run.config,
            degrees: run.sweep.results.iter().map(DegreeLoss::from).collect(),
            best_degree: best.degree,
            best_coefficients: best.coefficients.clone(),
            best_train_r2: run.best_train_r2,
            best_test_r2: run.best_test_r2,
            baseline_coefficients: base.coefficients.clone(),
            baseline_train_loss: base.train_loss,
            baseline_test_loss: base.test_loss,
        }
    }
}

/// Write any summary as pretty-printed JSON.
///
/// Non-finite floats serialize as `null` (serde_json has no NaN/inf literals).
pub fn write_summary_json<T: Serialize>(path: &Path, summary: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::invalid(format!("Failed to create summary JSON '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, summary)
        .map_err(|e| AppError::compute(format!("Failed to write summary JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::compute(format!("Failed to write summary JSON: {e}")))
}

/// Read a sweep summary back (used to compare runs across seeds).
pub fn read_sweep_summary(path: &Path) -> Result<SweepSummary, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::invalid(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::invalid(format!("Invalid summary JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_sweep_experiment;
    use crate::domain::{PolynomialDataConfig, SweepConfig};

    #[test]
    fn sweep_summary_round_trips_through_json() {
        let config = SweepRunConfig {
            seed: 7,
            data: PolynomialDataConfig {
                samples: 60,
                noise: 1.0,
            },
            sweep: SweepConfig {
                n_train: 40,
                n_test: 20,
                degree_min: 1,
                degree_max: 6,
            },
        };
        let run = run_sweep_experiment(&config).unwrap();
        let summary = SweepSummary::from_run(&run);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        write_summary_json(&path, &summary).unwrap();
        let back = read_sweep_summary(&path).unwrap();

        assert_eq!(back.tool, "rlab");
        assert_eq!(back.config, config);
        assert_eq!(back.degrees.len(), 6);
        assert_eq!(back.best_degree, run.sweep.best().degree);
        assert_eq!(back.best_coefficients.len(), back.best_degree + 1);
    }
}
