//! Fire merge engine core library.
//!
//! This crate provides:
//! - Same-location fire merging and grid-based plume merging
//! - Met-data time window reconciliation
//! - Persistence growth
//! - Fire document I/O and JSON schemas
//! - Structured logging and CLI exit codes

pub mod config;
pub mod exit_codes;
pub mod growth;
pub mod io;
pub mod logging;
pub mod merge;
pub mod metwindows;
pub mod schema;

pub use exit_codes::ExitCode;
pub use growth::{persist_fires, Persistence};
pub use merge::{FireMerger, PlumeMerger};
pub use metwindows::met_time_windows;
