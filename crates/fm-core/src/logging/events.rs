//! Structured event definitions for logging.
//!
//! Events follow a consistent schema for machine-parseable JSONL output.
//! All events include the run_id correlation ID and a stage.

use serde::{Deserialize, Serialize};

/// Processing stages of a fire merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Reading the fire document.
    Load,
    /// Same-location fire merging.
    Merge,
    /// Spatial bucketing for plume merging.
    Bucket,
    /// Plume-rise profile aggregation.
    Aggregate,
    /// Met-data time window selection.
    Window,
    /// Persistence growth.
    Grow,
    /// Writing output.
    Export,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Merge => "merge",
            Stage::Bucket => "bucket",
            Stage::Aggregate => "aggregate",
            Stage::Window => "window",
            Stage::Grow => "grow",
            Stage::Export => "export",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    // Load stage
    pub const INPUT_LOADED: &str = "input.loaded";

    // Merge stage
    pub const MERGE_STARTED: &str = "merge.started";
    pub const MERGE_PAIR_SKIPPED: &str = "merge.pair_skipped";
    pub const MERGE_PAIR_MERGED: &str = "merge.pair_merged";
    pub const MERGE_FINISHED: &str = "merge.finished";

    // Plume merge stages
    pub const PLUME_STARTED: &str = "plume.started";
    pub const PLUME_BUCKETED: &str = "plume.bucketed";
    pub const PLUME_HOUR_AGGREGATED: &str = "plume.hour_aggregated";
    pub const PLUME_FINISHED: &str = "plume.finished";

    // Window stage
    pub const WINDOWS_COMPUTED: &str = "windows.computed";

    // Grow stage
    pub const GROWTH_SKIPPED: &str = "growth.skipped";
    pub const GROWTH_PERSISTED: &str = "growth.persisted";

    // Export stage
    pub const OUTPUT_WRITTEN: &str = "output.written";

    // Error events
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Context for generating log events with a consistent run ID.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
        }
    }
}
