//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - classifier thresholds (`ClassifierConfig` and its two sections)
//! - fitted curve parameters (`LogisticParams`)
//! - classification outputs (`Classification`, `Label`)
//! - the named input batch (`ExperimentBatch`)

pub mod types;

pub use types::*;
