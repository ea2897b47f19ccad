//! Persistence growth settings.
//!
//! `growth.persistence` is either one config set or a list of them. The
//! first set whose `start_day`/`end_day` window contains its date to
//! persist is used:
//!
//! ```json
//! "persistence": [
//!     { "start_day": "Jan 1", "end_day": "May 31", "days_to_persist": 1 },
//!     { "start_day": "06-01", "end_day": 365, "daily_percentages": [100, 50] }
//! ]
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Accepted `start_day`/`end_day` formats, besides a bare day of year.
const DAY_FORMATS: [&str; 5] = ["%m-%d", "%b %d", "%b-%d", "%B %d", "%B-%d"];

/// A day within the year of the date being persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DaySpec {
    DayOfYear(u32),
    Text(String),
}

impl DaySpec {
    /// Resolve to a date in `year`.
    pub fn resolve(&self, year: i32) -> ValidationResult<NaiveDate> {
        let invalid = |s: &str| {
            ValidationError::SemanticError(format!("Invalid start/end day string: '{}'", s))
        };
        match self {
            DaySpec::DayOfYear(day) => {
                NaiveDate::from_yo_opt(year, *day).ok_or_else(|| invalid(&day.to_string()))
            }
            DaySpec::Text(text) => {
                let text = text.trim();
                if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                    return text
                        .parse::<u32>()
                        .ok()
                        .and_then(|day| NaiveDate::from_yo_opt(year, day))
                        .ok_or_else(|| invalid(text));
                }
                let dated = format!("{} {}", year, text);
                DAY_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(&dated, &format!("%Y {}", fmt)).ok())
                    .ok_or_else(|| invalid(text))
            }
        }
    }
}

/// One persistence config set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Day whose activity is projected forward. Defaults to today.
    #[serde(default)]
    pub date_to_persist: Option<NaiveDate>,

    #[serde(default)]
    pub start_day: Option<DaySpec>,

    #[serde(default)]
    pub end_day: Option<DaySpec>,

    /// Number of days to persist. Mutually exclusive with
    /// `daily_percentages`.
    #[serde(default)]
    pub days_to_persist: Option<i64>,

    /// Percent of the persisted day's activity to carry onto each following
    /// day.
    #[serde(default)]
    pub daily_percentages: Option<Vec<f64>>,

    /// Drop activity after the persisted day.
    #[serde(default)]
    pub truncate: bool,
}

impl PersistenceConfig {
    fn matches(&self, date: NaiveDate) -> ValidationResult<bool> {
        let start = self.start_day.as_ref().map(|d| d.resolve(date.year())).transpose()?;
        let end = self.end_day.as_ref().map(|d| d.resolve(date.year())).transpose()?;
        Ok(start.map_or(true, |s| s <= date) && end.map_or(true, |e| date <= e))
    }

    fn plan(&self, date_to_persist: NaiveDate) -> ValidationResult<PersistencePlan> {
        if self.days_to_persist.is_some() && self.daily_percentages.is_some() {
            return Err(ValidationError::SemanticError(
                "Specify 'days_to_persist' or 'daily_percentages', but not both".to_string(),
            ));
        }

        let daily_percentages = match &self.daily_percentages {
            Some(percentages) if !percentages.is_empty() => {
                if let Some(bad) = percentages.iter().find(|p| !p.is_finite() || **p < 0.0) {
                    return Err(ValidationError::invalid(
                        "growth.persistence.daily_percentages",
                        format!("Must be non-negative percentages, got {}", bad),
                    ));
                }
                percentages.clone()
            }
            _ => {
                let days = self.days_to_persist.unwrap_or(1);
                if days <= 0 {
                    return Err(ValidationError::invalid(
                        "growth.persistence.days_to_persist",
                        "'days_to_persist' must be a positive integer",
                    ));
                }
                vec![100.0; days as usize]
            }
        };

        Ok(PersistencePlan {
            date_to_persist,
            daily_percentages,
            truncate: self.truncate,
        })
    }
}

/// The `growth.persistence` value: one set or a list of sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistenceSetting {
    Many(Vec<PersistenceConfig>),
    One(PersistenceConfig),
}

impl PersistenceSetting {
    pub fn sets(&self) -> &[PersistenceConfig] {
        match self {
            PersistenceSetting::Many(sets) => sets,
            PersistenceSetting::One(set) => std::slice::from_ref(set),
        }
    }

    /// Pick the first set whose window contains its date to persist.
    ///
    /// `Ok(None)` means no set applies and growth should be skipped.
    pub fn select(&self, today: NaiveDate) -> ValidationResult<Option<PersistencePlan>> {
        let sets = self.sets();
        if sets.is_empty() {
            return Err(ValidationError::SemanticError(
                "Don't specify empty list of persistence config sets".to_string(),
            ));
        }
        for set in sets {
            let date = set.date_to_persist.unwrap_or(today);
            if set.matches(date)? {
                return set.plan(date).map(Some);
            }
        }
        Ok(None)
    }
}

/// A resolved persistence run.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistencePlan {
    pub date_to_persist: NaiveDate,
    /// One entry per persisted day.
    pub daily_percentages: Vec<f64>,
    pub truncate: bool,
}

impl PersistencePlan {
    pub fn days_to_persist(&self) -> usize {
        self.daily_percentages.len()
    }
}
