//! Fire merge engine.
//!
//! - [`FireMerger`]: folds records of the same fire (same location,
//!   non-overlapping windows, agreeing meta) into one
//! - [`PlumeMerger`]: folds every record of a grid cell into one
//! - [`merge_time_windows`]: interval reconciliation
//! - [`aggregate_plumerise_hour`]: mass-weighted plume-rise combination

pub mod bucket;
pub mod combine;
pub mod compat;
pub mod fire_merger;
pub mod plume_merger;
pub mod plumerise;
pub mod timewindow;

pub use bucket::bucket_fires;
pub use combine::{combine_fires, Placement};
pub use compat::{compatible, Compatibility, CompatibilityChecker};
pub use fire_merger::FireMerger;
pub use plume_merger::PlumeMerger;
pub use plumerise::{aggregate_plumerise_hour, combine_profiles, HourAggregate};
pub use timewindow::{merge_time_windows, overlaps};
