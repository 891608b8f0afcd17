//! Reporting utilities: batch summaries and the per-series detail table.

pub mod format;

pub use format::*;
