//! Domain types used throughout the experiments.
//!
//! This module defines:
//!
//! - datasets and train/test splits (`Sample`, `Dataset`, `TrainTestSplit`)
//! - descent state and history (`ParamPair`, `Trajectory`)
//! - evaluated grids (`ScalarField`, `LossSurface`)
//! - sweep outputs (`DegreeResult`, `LinearBaseline`, `SweepResult`)
//! - per-component configuration structs

pub mod config;
pub mod types;

pub use config::*;
pub use types::*;
