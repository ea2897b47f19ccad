//! Meteorology time-window settings.
//!
//! Both sections are optional; when present they add a UTC window to the
//! set derived from fire activity.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Dispersion run window: `num_hours` starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionConfig {
    pub start: DateTime<Utc>,
    pub num_hours: u32,
}

impl DispersionConfig {
    /// `(start, end)` as naive UTC.
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start.naive_utc();
        (start, start + Duration::hours(i64::from(self.num_hours)))
    }
}

/// Explicit met window, inclusive of both hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeWindowConfig {
    pub first_hour: DateTime<Utc>,
    pub last_hour: DateTime<Utc>,
}

impl TimeWindowConfig {
    /// `(first_hour, last_hour)` as naive UTC.
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.first_hour.naive_utc(), self.last_hour.naive_utc())
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.last_hour < self.first_hour {
            return Err(ValidationError::invalid(
                "findmetdata.time_window",
                format!(
                    "last_hour {} is before first_hour {}",
                    self.last_hour, self.first_hour
                ),
            ));
        }
        Ok(())
    }
}

/// The `findmetdata` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindMetDataConfig {
    #[serde(default)]
    pub time_window: Option<TimeWindowConfig>,
}

impl FindMetDataConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        match &self.time_window {
            Some(window) => window.validate(),
            None => Ok(()),
        }
    }
}
