//! Fire merge configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the `config.json` sections (merge, plume merge
//!   grid, met time windows, persistence growth)
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation with field-level errors

pub mod config;
pub mod grid;
pub mod merge;
pub mod metwindow;
pub mod persistence;
pub mod resolve;
pub mod validate;

pub use config::Config;
pub use grid::{Boundary, GridConfig, LatLng};
pub use merge::{MergeConfig, PlumeMergeConfig, DEFAULT_WEIGHT_SPECIES};
pub use metwindow::{DispersionConfig, FindMetDataConfig, TimeWindowConfig};
pub use persistence::{DaySpec, PersistenceConfig, PersistencePlan, PersistenceSetting};
pub use resolve::{resolve_config, ConfigPath, ConfigSource};
pub use validate::{ValidationError, ValidationResult};
