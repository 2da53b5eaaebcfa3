//! `regression-lab` library crate.
//!
//! The binary (`rlab`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the numeric cores (loss surface, gradient descent, degree sweep) are reusable
//!   without the CLI, plots or exports

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
