//! Per-component configuration.
//!
//! Each numeric core receives its own config struct and validates it on entry.
//! These are derived from CLI flags (plus defaults) by `app`.

use serde::{Deserialize, Serialize};

use crate::domain::ParamPair;
use crate::error::AppError;

/// Gradient-descent settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DescentConfig {
    /// Fixed step size. Zero is accepted (the trajectory then stays put).
    pub learning_rate: f64,
    /// Iteration count; the run always performs exactly this many updates.
    pub iterations: usize,
    pub initial: ParamPair,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.00015,
            iterations: 15_000,
            initial: ParamPair::ORIGIN,
        }
    }
}

impl DescentConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.learning_rate.is_finite() && self.learning_rate >= 0.0) {
            return Err(AppError::invalid(format!(
                "Invalid learning rate {} (must be finite and >= 0).",
                self.learning_rate
            )));
        }
        if self.iterations == 0 {
            return Err(AppError::invalid("Iteration count must be > 0."));
        }
        if !self.initial.is_finite() {
            return Err(AppError::invalid("Initial parameters must be finite."));
        }
        Ok(())
    }
}

/// Half-open candidate axis `[start, stop)` sampled every `step`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl AxisSpec {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }
}

/// Candidate axes for the loss surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    pub bias: AxisSpec,
    pub weight: AxisSpec,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            bias: AxisSpec::new(0.0, 100.0, 1.0),
            weight: AxisSpec::new(-5.0, 5.0, 0.1),
        }
    }
}

/// Polynomial-degree sweep settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub n_train: usize,
    pub n_test: usize,
    pub degree_min: usize,
    pub degree_max: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_train: 300,
            n_test: 200,
            degree_min: 2,
            degree_max: 25,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.n_train == 0 || self.n_test == 0 {
            return Err(AppError::insufficient(format!(
                "Train/test sizes must be > 0 (train={}, test={}).",
                self.n_train, self.n_test
            )));
        }
        if self.degree_min > self.degree_max {
            return Err(AppError::invalid(format!(
                "Invalid degree range: min={} > max={}.",
                self.degree_min, self.degree_max
            )));
        }
        Ok(())
    }

    /// Number of degrees the sweep will fit.
    pub fn degree_count(&self) -> usize {
        self.degree_max.saturating_sub(self.degree_min) + 1
    }
}

/// Noisy linear demo data: `y = slope·x + intercept + noise·U[0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearDataConfig {
    pub xs: Vec<f64>,
    pub slope: f64,
    pub intercept: f64,
    pub noise: f64,
}

impl Default for LinearDataConfig {
    fn default() -> Self {
        Self {
            xs: vec![35.0, 38.0, 31.0, 20.0, 22.0, 25.0, 17.0, 60.0, 8.0, 60.0],
            slope: 2.0,
            intercept: 50.0,
            noise: 5.0,
        }
    }
}

/// Noisy quintic demo data: `y = 0.5x⁵ − x³ − x² + 2 + noise·N(0, 1)` on `x ∈ [−3, 3)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolynomialDataConfig {
    pub samples: usize,
    pub noise: f64,
}

impl Default for PolynomialDataConfig {
    fn default() -> Self {
        Self {
            samples: 500,
            noise: 5.0,
        }
    }
}
