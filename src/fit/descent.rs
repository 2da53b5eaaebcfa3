//! Full-batch gradient descent for `ŷ = w·x + b`.
//!
//! State is `(b, w, iteration)`. Each iteration accumulates the gradient of the
//! half sum of squared errors over the *entire* dataset:
//!
//! ```text
//! b_grad = Σ (w·x + b − y)
//! w_grad = Σ (w·x + b − y)·x
//! b ← b − lr·b_grad
//! w ← w − lr·w_grad
//! ```
//!
//! The loop runs for exactly `iterations` steps. There is no convergence check and
//! no clipping: with a learning rate that is too large for the data scale the
//! parameters blow up to inf/NaN, and that trajectory is returned as-is.

use log::{debug, warn};

use crate::domain::{Dataset, DescentConfig, ParamPair, Trajectory};
use crate::error::AppError;

/// Gradient of the half-SSE objective at `params`, as `(b_grad, w_grad)`.
pub fn gradient(data: &Dataset, params: ParamPair) -> (f64, f64) {
    let mut b_grad = 0.0;
    let mut w_grad = 0.0;
    for p in data.points() {
        let residual = params.weight * p.x + params.bias - p.y;
        b_grad += residual;
        w_grad += residual * p.x;
    }
    (b_grad, w_grad)
}

/// One update step.
pub fn step(data: &Dataset, params: ParamPair, learning_rate: f64) -> ParamPair {
    let (b_grad, w_grad) = gradient(data, params);
    ParamPair {
        bias: params.bias - learning_rate * b_grad,
        weight: params.weight - learning_rate * w_grad,
    }
}

/// Run gradient descent and return the full trajectory.
///
/// The trajectory holds `config.iterations + 1` snapshots; the first is
/// `config.initial`, the last is the final estimate.
pub fn run_descent(data: &Dataset, config: &DescentConfig) -> Result<Trajectory, AppError> {
    config.validate()?;

    debug!(
        "gradient descent: lr={} iterations={} init=({}, {}) n={}",
        config.learning_rate,
        config.iterations,
        config.initial.bias,
        config.initial.weight,
        data.len()
    );

    let mut trajectory = Trajectory::with_capacity(config.initial, config.iterations);
    let mut params = config.initial;
    for _ in 0..config.iterations {
        params = step(data, params, config.learning_rate);
        trajectory.push(params);
    }

    if trajectory.is_divergent() {
        warn!(
            "gradient descent diverged (lr={}); final params b={} w={}",
            config.learning_rate, params.bias, params.weight
        );
    }

    Ok(trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact_line() -> Dataset {
        let xs = [35.0, 38.0, 31.0, 20.0, 22.0, 25.0, 17.0, 60.0, 8.0, 60.0];
        let ys: Vec<f64> = xs.iter().map(|&x| 2.0 * x + 50.0).collect();
        Dataset::from_columns(&xs, &ys).unwrap()
    }

    #[test]
    fn trajectory_has_iterations_plus_one_entries() {
        let cfg = DescentConfig {
            learning_rate: 1e-4,
            iterations: 37,
            initial: ParamPair::new(3.0, -1.0),
        };
        let t = run_descent(&exact_line(), &cfg).unwrap();
        assert_eq!(t.steps().len(), 38);
        assert_eq!(t.iterations(), 37);
        assert_eq!(t.initial(), ParamPair::new(3.0, -1.0));
    }

    #[test]
    fn zero_learning_rate_keeps_initial_params() {
        let cfg = DescentConfig {
            learning_rate: 0.0,
            iterations: 50,
            initial: ParamPair::new(1.5, -0.25),
        };
        let t = run_descent(&exact_line(), &cfg).unwrap();
        assert!(t.steps().iter().all(|&p| p == cfg.initial));
    }

    #[test]
    fn converges_on_noise_free_line() {
        let cfg = DescentConfig {
            learning_rate: 0.00015,
            iterations: 60_000,
            initial: ParamPair::ORIGIN,
        };
        let t = run_descent(&exact_line(), &cfg).unwrap();
        let last = t.last();
        assert!((last.bias - 50.0).abs() < 1e-3, "b={}", last.bias);
        assert!((last.weight - 2.0).abs() < 1e-4, "w={}", last.weight);
    }

    #[test]
    fn first_step_matches_hand_computed_update() {
        let data = Dataset::from_columns(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
        // At (0,0): residuals are -3 and -5, so b_grad=-8 and w_grad=-13.
        assert_eq!(gradient(&data, ParamPair::ORIGIN), (-8.0, -13.0));
        let next = step(&data, ParamPair::ORIGIN, 0.1);
        assert!((next.bias - 0.8).abs() < 1e-12);
        assert!((next.weight - 1.3).abs() < 1e-12);
    }

    #[test]
    fn large_learning_rate_diverges_without_error() {
        let cfg = DescentConfig {
            learning_rate: 0.01,
            iterations: 2_000,
            initial: ParamPair::ORIGIN,
        };
        let t = run_descent(&exact_line(), &cfg).unwrap();
        assert_eq!(t.steps().len(), 2_001);
        assert!(t.is_divergent());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let cfg = DescentConfig {
            learning_rate: f64::NAN,
            ..DescentConfig::default()
        };
        assert_eq!(run_descent(&exact_line(), &cfg).unwrap_err().exit_code(), 2);
    }
}
