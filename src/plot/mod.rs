//! Plotting utilities.
//!
//! - `ascii`: deterministic terminal renderings
//! - `svg`: Plotters figures written to disk

pub mod ascii;
pub mod svg;

pub use ascii::*;
pub use svg::*;
