//! Regression error metrics.

use crate::error::AppError;

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<(), AppError> {
    if actual.len() != predicted.len() {
        return Err(AppError::invalid(format!(
            "Length mismatch: {} targets vs {} predictions.",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(AppError::insufficient("Cannot score an empty prediction set."));
    }
    Ok(())
}

/// Mean of squared differences.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64, AppError> {
    check_lengths(actual, predicted)?;
    let sse: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| {
            let r = a - p;
            r * r
        })
        .sum();
    Ok(sse / actual.len() as f64)
}

/// Coefficient of determination.
///
/// Constant targets give `1.0` for a perfect fit and `0.0` otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> Result<f64, AppError> {
    check_lengths(actual, predicted)?;
    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;

    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&a, &p) in actual.iter().zip(predicted.iter()) {
        ss_res += (a - p) * (a - p);
        ss_tot += (a - mean) * (a - mean);
    }

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}
