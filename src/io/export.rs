//! Export run results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{SweepResult, Trajectory};
use crate::error::AppError;

/// Write the descent trajectory as `iteration,b,w`.
///
/// Row `0` is the initial point; non-finite entries are written as-is (`NaN`, `inf`).
pub fn write_trajectory_csv(path: &Path, trajectory: &Trajectory) -> Result<(), AppError> {
    let mut out = create(path, "trajectory CSV")?;

    writeln!(out, "iteration,b,w").map_err(|e| write_err("trajectory CSV header", e))?;
    for (i, p) in trajectory.steps().iter().enumerate() {
        writeln!(out, "{i},{},{}", p.bias, p.weight).map_err(|e| write_err("trajectory CSV row", e))?;
    }

    out.flush().map_err(|e| write_err("trajectory CSV", e))
}

/// Write the per-degree sweep table as `degree,train_loss,test_loss,average_loss,best`.
pub fn write_sweep_csv(path: &Path, sweep: &SweepResult) -> Result<(), AppError> {
    let mut out = create(path, "sweep CSV")?;
    let best_degree = sweep.best().degree;

    writeln!(out, "degree,train_loss,test_loss,average_loss,best").map_err(|e| write_err("sweep CSV header", e))?;
    for r in &sweep.results {
        writeln!(
            out,
            "{},{:.10},{:.10},{:.10},{}",
            r.degree,
            r.train_loss,
            r.test_loss,
            r.average_loss,
            r.degree == best_degree
        )
        .map_err(|e| write_err("sweep CSV row", e))?;
    }

    out.flush().map_err(|e| write_err("sweep CSV", e))
}

fn create(path: &Path, what: &str) -> Result<BufWriter<File>, AppError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| AppError::invalid(format!("Failed to create {what} '{}': {e}", path.display())))
}

fn write_err(what: &str, e: std::io::Error) -> AppError {
    AppError::compute(format!("Failed to write {what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DegreeResult, LinearBaseline, ParamPair};

    fn record(degree: usize, train: f64, test: f64) -> DegreeResult {
        DegreeResult {
            degree,
            train_loss: train,
            test_loss: test,
            average_loss: (train + test) / 2.0,
            coefficients: vec![],
            train_predictions: vec![],
            test_predictions: vec![],
        }
    }

    #[test]
    fn trajectory_csv_has_one_row_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.csv");
        let mut t = Trajectory::new(ParamPair::ORIGIN);
        t.push(ParamPair::new(0.5, 1.5));
        t.push(ParamPair::new(f64::NAN, f64::INFINITY));

        write_trajectory_csv(&path, &t).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines, vec!["iteration,b,w", "0,0,0", "1,0.5,1.5", "2,NaN,inf"]);
    }

    #[test]
    fn sweep_csv_flags_best_degree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        let sweep = SweepResult {
            results: vec![record(2, 4.0, 6.0), record(3, 1.0, 2.0)],
            best_index: 1,
            baseline: LinearBaseline {
                coefficients: vec![0.0, 1.0],
                train_loss: 9.0,
                test_loss: 9.0,
                train_r2: 0.1,
                test_r2: 0.1,
                train_predictions: vec![],
                test_predictions: vec![],
            },
        };

        write_sweep_csv(&path, &sweep).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("2,") && lines[1].ends_with(",false"));
        assert!(lines[2].starts_with("3,") && lines[2].ends_with(",true"));
    }

    #[test]
    fn missing_directory_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("t.csv");
        let err = write_trajectory_csv(&path, &Trajectory::new(ParamPair::ORIGIN)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
