//! Plume-rise profiles: vertical distribution of emitted mass for one hour.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Histogram of emitted mass over height bins.
///
/// `heights` are the `N + 1` bin boundaries (meters) for the `N`
/// `emission_fractions`. The smolder fraction is the share of mass that is
/// not lofted into any bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlumeriseHour {
    pub emission_fractions: Vec<f64>,
    pub heights: Vec<f64>,
    pub smolder_fraction: f64,
}

impl PlumeriseHour {
    pub fn new(emission_fractions: Vec<f64>, heights: Vec<f64>, smolder_fraction: f64) -> Self {
        PlumeriseHour {
            emission_fractions,
            heights,
            smolder_fraction,
        }
    }

    pub fn num_bins(&self) -> usize {
        self.emission_fractions.len()
    }

    /// Lowest bin boundary.
    pub fn bottom(&self) -> Option<f64> {
        self.heights.first().copied()
    }

    /// Highest bin boundary.
    pub fn top(&self) -> Option<f64> {
        self.heights.last().copied()
    }

    /// Sum of emission fractions plus the smolder fraction.
    pub fn total_fraction(&self) -> f64 {
        self.emission_fractions.iter().sum::<f64>() + self.smolder_fraction
    }

    /// Check structural well-formedness.
    ///
    /// `hour` only labels the error. Fractions are not required to sum to
    /// anything in particular.
    pub fn validate(&self, hour: &str) -> Result<()> {
        let invalid = |reason: String| Error::InvalidProfile {
            hour: hour.to_string(),
            reason,
        };

        if self.emission_fractions.is_empty() {
            return Err(invalid("no emission fractions".to_string()));
        }
        if self.heights.len() != self.emission_fractions.len() + 1 {
            return Err(invalid(format!(
                "{} fractions but {} heights",
                self.emission_fractions.len(),
                self.heights.len()
            )));
        }
        if self.heights.iter().any(|h| !h.is_finite()) {
            return Err(invalid("non-finite height".to_string()));
        }
        if self.heights.windows(2).any(|w| w[1] < w[0]) {
            return Err(invalid("heights must be non-decreasing".to_string()));
        }
        if self
            .emission_fractions
            .iter()
            .any(|f| !f.is_finite() || *f < 0.0)
        {
            return Err(invalid("emission fractions must be finite and non-negative".to_string()));
        }
        if !(0.0..=1.0).contains(&self.smolder_fraction) {
            return Err(invalid(format!(
                "smolder fraction {} outside [0, 1]",
                self.smolder_fraction
            )));
        }
        Ok(())
    }
}
