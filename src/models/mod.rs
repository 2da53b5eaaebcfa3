//! Model implementations.
//!
//! Models are small structs plus pure functions so that fitting/sweep code can
//! stay generic over the solver.

pub mod model;

pub use model::*;
