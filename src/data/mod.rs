//! Synthetic data sources for the experiments.

pub mod sample;

pub use sample::*;
