//! Merge engine settings.

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::validate::{require_finite, ValidationError, ValidationResult};

/// Species whose hourly emissions weight plume-rise profiles.
pub const DEFAULT_WEIGHT_SPECIES: &str = "PM2.5";

fn default_weight_species() -> String {
    DEFAULT_WEIGHT_SPECIES.to_string()
}

/// Settings for the same-location fire merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Maximum |Δlat| and |Δlng| (degrees) for two fires to count as the
    /// same location. Zero means exact equality.
    #[serde(default)]
    pub location_tolerance: f64,

    /// Species used to weight plume-rise profiles on shared hours.
    #[serde(default = "default_weight_species")]
    pub weight_species: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        MergeConfig {
            location_tolerance: 0.0,
            weight_species: default_weight_species(),
        }
    }
}

impl MergeConfig {
    pub fn validate(&self) -> ValidationResult<()> {
        require_finite("merge.location_tolerance", self.location_tolerance)?;
        if self.location_tolerance < 0.0 {
            return Err(ValidationError::invalid(
                "merge.location_tolerance",
                format!("Must be non-negative, got {}", self.location_tolerance),
            ));
        }
        validate_species("merge.weight_species", &self.weight_species)
    }
}

/// Settings for the spatial plume merger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlumeMergeConfig {
    pub grid: GridConfig,

    #[serde(default = "default_weight_species")]
    pub weight_species: String,
}

impl PlumeMergeConfig {
    pub fn new(grid: GridConfig) -> Self {
        PlumeMergeConfig {
            grid,
            weight_species: default_weight_species(),
        }
    }

    /// Parse and validate an untyped config block such as
    /// `{"grid": {"spacing": ..., "boundary": {...}}}`.
    pub fn from_value(value: &serde_json::Value) -> ValidationResult<Self> {
        match value.get("grid") {
            None => return Err(ValidationError::MissingField("grid".to_string())),
            Some(serde_json::Value::Object(_)) => {}
            Some(other) => {
                return Err(ValidationError::invalid(
                    "grid",
                    format!("Must be an object, got {}", other),
                ))
            }
        }
        let config: PlumeMergeConfig = serde_json::from_value(value.clone())
            .map_err(|e| ValidationError::ParseError(format!("Invalid grid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        self.grid.validate()?;
        validate_species("plume_merge.weight_species", &self.weight_species)
    }
}

fn validate_species(field: &str, species: &str) -> ValidationResult<()> {
    if species.trim().is_empty() {
        return Err(ValidationError::invalid(field, "Must not be empty"));
    }
    Ok(())
}
