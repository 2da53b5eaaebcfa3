//! Synthetic dataset generation.
//!
//! Generators never own randomness: the caller passes the RNG, so a fixed seed
//! reproduces the same dataset and nothing in the numeric cores touches it.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::domain::{Dataset, LinearDataConfig, PolynomialDataConfig, Sample};
use crate::error::AppError;

/// Lower edge of the polynomial demo's input range.
const POLY_X_MIN: f64 = -3.0;

/// Width of the polynomial demo's input range (`x ∈ [-3, 3)`).
const POLY_X_SPAN: f64 = 6.0;

/// Noiseless target of the polynomial demo: `0.5x⁵ − x³ − x² + 2`.
pub fn quintic(x: f64) -> f64 {
    0.5 * x.powi(5) - x.powi(3) - x.powi(2) + 2.0
}

/// `y = slope·x + intercept + noise·U[0, 1)` for each configured `x`.
pub fn linear_dataset<R: Rng + ?Sized>(config: &LinearDataConfig, rng: &mut R) -> Result<Dataset, AppError> {
    if config.xs.is_empty() {
        return Err(AppError::insufficient("Linear dataset needs at least one x value."));
    }
    check_noise(config.noise)?;
    if !(config.slope.is_finite() && config.intercept.is_finite()) {
        return Err(AppError::invalid("Linear dataset slope/intercept must be finite."));
    }

    let points = config
        .xs
        .iter()
        .map(|&x| {
            let u: f64 = rng.gen_range(0.0..1.0);
            Sample {
                x,
                y: config.slope * x + config.intercept + config.noise * u,
            }
        })
        .collect();

    Dataset::new(points)
}

/// `x = 6·U[0, 1) − 3`, `y = quintic(x) + noise·N(0, 1)`.
///
/// All `x` values are drawn before any noise, so the inputs for a given seed do
/// not depend on the noise level.
pub fn polynomial_dataset<R: Rng + ?Sized>(
    config: &PolynomialDataConfig,
    rng: &mut R,
) -> Result<Dataset, AppError> {
    if config.samples == 0 {
        return Err(AppError::invalid("Sample count must be > 0."));
    }
    check_noise(config.noise)?;

    let xs: Vec<f64> = (0..config.samples)
        .map(|_| POLY_X_SPAN * rng.gen_range(0.0..1.0) + POLY_X_MIN)
        .collect();

    let points = xs
        .into_iter()
        .map(|x| {
            let z: f64 = StandardNormal.sample(rng);
            Sample {
                x,
                y: quintic(x) + config.noise * z,
            }
        })
        .collect();

    Dataset::new(points)
}

fn check_noise(noise: f64) -> Result<(), AppError> {
    if !(noise.is_finite() && noise >= 0.0) {
        return Err(AppError::invalid(format!(
            "Noise scale must be finite and >= 0, got {noise}."
        )));
    }
    Ok(())
}
