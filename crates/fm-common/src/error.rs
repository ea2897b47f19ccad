//! Error types for the fire merge engine.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! Incompatible fire pairs are *not* errors: the merge engine simply leaves
//! them unmerged. Errors cover bad configuration, malformed input records
//! and I/O.
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Plume-Rise Profile
//!   Reason: invalid plume-rise profile for hour 2015-08-04T17:00:00: 4 fractions but 4 heights
//!   Fix: Profiles need one more height than fractions, and heights must not decrease.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 20,
//!   "category": "input",
//!   "message": "invalid fire SF11C14225236095807750: start is after end",
//!   "context": { "fire_id": "SF11C14225236095807750" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for fire merge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration errors (grid, persistence, time windows).
    Config,
    /// Malformed fire records or plume-rise profiles.
    Input,
    /// Failures while combining two records.
    Merge,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Merge => write!(f, "merge"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the fire merge engine.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no time windows: no fires with activity and no configured windows")]
    NoTimeWindows,

    // Input errors (20-29)
    #[error("invalid fire {fire_id}: {reason}")]
    InvalidFire { fire_id: String, reason: String },

    #[error("invalid plume-rise profile for hour {hour}: {reason}")]
    InvalidProfile { hour: String, reason: String },

    // Merge errors (30-39)
    #[error("consumption shape mismatch at '{key}': a value and a category cannot be summed")]
    ConsumptionShapeMismatch { key: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Input errors
    /// - 30-39: Merge errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::NoTimeWindows => 12,
            Error::InvalidFire { .. } => 20,
            Error::InvalidProfile { .. } => 21,
            Error::ConsumptionShapeMismatch { .. } => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::NoTimeWindows => ErrorCategory::Config,
            Error::InvalidFire { .. } | Error::InvalidProfile { .. } => ErrorCategory::Input,
            Error::ConsumptionShapeMismatch { .. } => ErrorCategory::Merge,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => "Run 'fm-core check' to validate the configuration file.",
            Error::NoTimeWindows => {
                "Load fires with activity, or configure 'dispersion' or 'findmetdata.time_window'."
            }
            Error::InvalidFire { .. } => {
                "Fix the record upstream: start must not follow end and numbers must be in range."
            }
            Error::InvalidProfile { .. } => {
                "Profiles need one more height than fractions, and heights must not decrease."
            }
            Error::ConsumptionShapeMismatch { .. } => {
                "Fires being merged must report consumption with the same category structure."
            }
            Error::Io(_) => "Check that the input file exists and the output location is writable.",
            Error::Json(_) => "Invalid JSON. Check syntax with 'jq . <file>'.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::NoTimeWindows => "No Time Windows",
            Error::InvalidFire { .. } => "Invalid Fire Record",
            Error::InvalidProfile { .. } => "Invalid Plume-Rise Profile",
            Error::ConsumptionShapeMismatch { .. } => "Consumption Shape Mismatch",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Additional structured context (e.g., fire id, hour).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidFire { fire_id, .. } => {
                context.insert("fire_id".to_string(), serde_json::json!(fire_id));
            }
            Error::InvalidProfile { hour, .. } => {
                context.insert("hour".to_string(), serde_json::json!(hour));
            }
            Error::ConsumptionShapeMismatch { key } => {
                context.insert("key".to_string(), serde_json::json!(key));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
