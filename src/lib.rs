//! `curve-classify` library crate.
//!
//! The binary (`classify`) is a thin wrapper around this library so that:
//!
//! - the classifier is testable without spawning processes
//! - it can be embedded in other services (one instance, many threads)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod classify;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod models;
pub mod report;
