//! Scalar-field and loss-surface evaluation.
//!
//! Every cell is independent, so rows are evaluated in parallel. Within a cell
//! the data points are summed sequentially in dataset order, which keeps the
//! result bit-for-bit reproducible regardless of thread count.

use log::debug;
use rayon::prelude::*;

use crate::domain::{Dataset, LossSurface, ScalarField, SurfaceConfig};
use crate::error::AppError;

/// Evaluate `f(row, col)` over every grid point (row-major).
pub fn evaluate_field<F>(rows: &[f64], cols: &[f64], f: F) -> Result<ScalarField, AppError>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    if rows.is_empty() || cols.is_empty() {
        return Err(AppError::invalid(format!(
            "Grid axes must be non-empty (rows={}, cols={}).",
            rows.len(),
            cols.len()
        )));
    }

    let values: Vec<f64> = rows
        .par_iter()
        .flat_map_iter(|&r| cols.iter().map(move |&c| (r, c)))
        .map(|(r, c)| f(r, c))
        .collect();

    Ok(ScalarField::from_parts(rows.to_vec(), cols.to_vec(), values))
}

/// Total half squared error of `ŷ = w·x + b` over the dataset.
pub fn half_sse(data: &Dataset, bias: f64, weight: f64) -> f64 {
    let mut total = 0.0;
    for p in data.points() {
        let r = weight * p.x + bias - p.y;
        total += 0.5 * r * r;
    }
    total
}

/// Loss surface over explicit candidate axes.
///
/// `loss(i, j) = Σ_n ½(weights[j]·x_n + biases[i] − y_n)²`.
pub fn loss_surface(data: &Dataset, biases: &[f64], weights: &[f64]) -> Result<LossSurface, AppError> {
    debug!(
        "evaluating loss surface: {} bias x {} weight candidates over {} points",
        biases.len(),
        weights.len(),
        data.len()
    );
    let field = evaluate_field(biases, weights, |b, w| half_sse(data, b, w))?;
    Ok(LossSurface::new(field))
}

/// Loss surface over the axes described by `config`.
pub fn loss_surface_from_config(data: &Dataset, config: &SurfaceConfig) -> Result<LossSurface, AppError> {
    let biases = config.bias.values()?;
    let weights = config.weight.values()?;
    loss_surface(data, &biases, &weights)
}

/// The bowl `(x − cx)² + (y − cy)²` used by the contour demo.
pub fn bowl(center: (f64, f64)) -> impl Fn(f64, f64) -> f64 + Sync {
    move |x, y| (x - center.0).powi(2) + (y - center.1).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AxisSpec;

    fn demo_data() -> Dataset {
        Dataset::from_columns(&[1.0, 2.0, 4.0, -3.0], &[3.0, 2.5, 9.0, -4.0]).unwrap()
    }

    #[test]
    fn surface_matches_direct_recomputation() {
        let data = demo_data();
        let biases = [-1.0, 0.0, 0.5, 2.0, 3.25];
        let weights = [-2.0, 0.0, 1.5, 2.0];
        let surface = loss_surface(&data, &biases, &weights).unwrap();

        assert_eq!(surface.bias_candidates().len(), 5);
        assert_eq!(surface.weight_candidates().len(), 4);

        for (i, &b) in biases.iter().enumerate() {
            for (j, &w) in weights.iter().enumerate() {
                let mut expected = 0.0;
                for p in data.points() {
                    expected += 0.5 * (w * p.x + b - p.y).powi(2);
                }
                let got = surface.loss(i, j);
                assert!(
                    (got - expected).abs() < 1e-12,
                    "cell ({i},{j}) b={b} w={w}: expected {expected}, got {got}"
                );
            }
        }
    }

    #[test]
    fn surface_argmin_near_true_line() {
        let xs: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|&x| 2.0 * x + 5.0).collect();
        let data = Dataset::from_columns(&xs, &ys).unwrap();
        let cfg = SurfaceConfig {
            bias: AxisSpec::new(0.0, 10.0, 1.0),
            weight: AxisSpec::new(0.0, 4.0, 0.5),
        };
        let surface = loss_surface_from_config(&data, &cfg).unwrap();
        let best = surface.argmin().unwrap();
        assert_eq!(best.bias, 5.0);
        assert_eq!(best.weight, 2.0);
        assert_eq!(surface.loss(5, 4), 0.0);
    }

    #[test]
    fn empty_axis_is_rejected() {
        let err = loss_surface(&demo_data(), &[], &[1.0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bowl_field_minimum_at_center() {
        let axis: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let field = evaluate_field(&axis, &axis, bowl((5.0, 5.0))).unwrap();
        assert_eq!(field.min_cell(), Some((4, 4)));
        assert_eq!(field.get(0, 0), 32.0);
        assert_eq!(field.get(9, 4), 25.0);
    }
}
