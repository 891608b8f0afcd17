//! Classification of 5PL-shaped time series.
//!
//! - `classifier`: validation, fit, RMSE gate and the two-stage decision
//! - `batch`: independent, order-preserving classification of many series

pub mod batch;
pub mod classifier;

pub use batch::*;
pub use classifier::*;
