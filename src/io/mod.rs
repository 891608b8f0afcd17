//! Input/output helpers.
//!
//! - classifier configuration JSON (`config`)
//! - the names + matrix input format and the label output format (`format`)
//! - plain file reads/writes for the binary (`export`)

pub mod config;
pub mod export;
pub mod format;

pub use config::*;
pub use export::*;
pub use format::*;
