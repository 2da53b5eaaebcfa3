//! Numeric cores.
//!
//! Responsibilities:
//!
//! - generate candidate axes (`grid`)
//! - evaluate scalar fields and the `(b, w)` loss surface (`surface`, parallel rows)
//! - run full-batch gradient descent (`descent`)
//! - sweep polynomial degrees and select the best one (`sweep`, parallel fits)

pub mod descent;
pub mod grid;
pub mod surface;
pub mod sweep;

pub use descent::*;
pub use grid::*;
pub use surface::*;
pub use sweep::*;
