//! The `config.json` document.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::merge::{MergeConfig, PlumeMergeConfig};
use crate::metwindow::{DispersionConfig, FindMetDataConfig};
use crate::persistence::PersistenceSetting;
use crate::validate::{ValidationError, ValidationResult};

/// Complete configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub merge: MergeConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plume_merge: Option<PlumeMergeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispersion: Option<DispersionConfig>,

    #[serde(default)]
    pub findmetdata: FindMetDataConfig,

    #[serde(default)]
    pub growth: GrowthConfig,
}

/// The `growth` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<PersistenceSetting>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a JSON string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Semantic validation of every present section.
    ///
    /// Persistence sets are only checked for shape here; day strings are
    /// resolved when a set is selected.
    pub fn validate(&self) -> ValidationResult<()> {
        self.merge.validate()?;
        if let Some(plume) = &self.plume_merge {
            plume.validate()?;
        }
        self.findmetdata.validate()?;
        if let Some(setting) = &self.growth.persistence {
            if setting.sets().is_empty() {
                return Err(ValidationError::SemanticError(
                    "Don't specify empty list of persistence config sets".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let config = Config::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_json() {
        let err = Config::from_str("{").unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn test_full_document() {
        let config = Config::from_str(
            r#"{
                "merge": {"location_tolerance": 0.001},
                "plume_merge": {
                    "grid": {
                        "spacing": 0.5,
                        "boundary": {"sw": {"lat": 30, "lng": -120}, "ne": {"lat": 40, "lng": -110}}
                    }
                },
                "dispersion": {"start": "2014-05-29T19:00:00Z", "num_hours": 12},
                "findmetdata": {"time_window": {
                    "first_hour": "2016-01-04T04:00:00Z",
                    "last_hour": "2016-01-05T13:00:00Z"
                }},
                "growth": {"persistence": {"days_to_persist": 2}}
            }"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.merge.location_tolerance, 0.001);
        assert_eq!(config.merge.weight_species, "PM2.5");
        assert!(config.plume_merge.is_some());
        assert!(config.dispersion.is_some());
        assert!(config.growth.persistence.is_some());
    }
}
