//! Fire merge common types, IDs, and errors.
//!
//! This crate provides foundational types shared across fm-core modules:
//! - The fire record and its hourly series
//! - Plume-rise profiles and consumption trees
//! - Fire identifiers and pluggable id sources
//! - Common error types
//! - Output format specifications

pub mod consumption;
pub mod error;
pub mod fire;
pub mod id;
pub mod output;
pub mod profile;
pub mod window;

pub use consumption::{Consumption, ConsumptionTree};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use fire::{Fire, FireDocument, Hour, Hourly, Meta, SpeciesAmounts, HOUR_FORMAT};
pub use id::{FireId, FixedIdSource, IdSource, SequentialIdSource, UuidIdSource};
pub use output::OutputFormat;
pub use profile::PlumeriseHour;
pub use window::TimeWindow;
