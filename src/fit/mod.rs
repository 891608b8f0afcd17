//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - seed the 5PL parameters from the data
//! - pose the least-squares problem and run the solver within the evaluation budget
//! - compute the RMSE of the fitted curve

pub mod fitter;
pub mod problem;

pub use fitter::*;
