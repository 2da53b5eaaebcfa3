//! Input/output helpers.
//!
//! - CSV exports of trajectories and sweep tables (`export`)
//! - JSON run summaries (`summary`)

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
