//! Candidate axis generation.
//!
//! The loss surface is evaluated over two explicit candidate axes (bias and
//! weight). Axes are ordinary ordered sequences, so callers may also hand-craft
//! them; these helpers cover the usual evenly-stepped case.

use crate::domain::AxisSpec;
use crate::error::AppError;

/// Half-open `[start, stop)` range sampled every `step`.
///
/// Length is `ceil((stop - start) / step)` and values are `start + i * step`
/// (not accumulated), so `arange(-5.0, 5.0, 0.1)` has exactly 100 entries.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, AppError> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(AppError::invalid(format!(
            "Invalid axis: start={start}, stop={stop}, step={step} (must be finite)."
        )));
    }
    if step <= 0.0 {
        return Err(AppError::invalid(format!("Axis step must be > 0, got {step}.")));
    }
    if stop <= start {
        return Err(AppError::invalid(format!(
            "Invalid axis: start={start}, stop={stop} (must have stop > start)."
        )));
    }

    // Tolerance keeps `10.0 / 0.1` from rounding up to 101 entries.
    let span = (stop - start) / step;
    let steps = (span - 1e-9).ceil().max(1.0) as usize;

    Ok((0..steps).map(|i| start + step * i as f64).collect())
}

/// Integer-valued axis `start, start+1, …, stop` (inclusive).
pub fn inclusive_steps(start: i64, stop: i64) -> Result<Vec<f64>, AppError> {
    if stop < start {
        return Err(AppError::invalid(format!(
            "Invalid axis: start={start}, stop={stop} (must have stop >= start)."
        )));
    }
    Ok((start..=stop).map(|v| v as f64).collect())
}

impl AxisSpec {
    /// Resolve to the candidate values.
    pub fn values(&self) -> Result<Vec<f64>, AppError> {
        arange(self.start, self.stop, self.step)
    }
}
