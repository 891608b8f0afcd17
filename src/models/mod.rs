//! Curve model implementations.
//!
//! Models are small, pure functions so the least-squares problem in `fit`
//! stays a thin adapter.

pub mod model;

pub use model::*;
