//! Mathematical utilities: degree expansion, least squares, error metrics.

pub mod features;
pub mod metrics;
pub mod ols;

pub use features::*;
pub use metrics::*;
pub use ols::*;
