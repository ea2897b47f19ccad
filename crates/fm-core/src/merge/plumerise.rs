//! Mass-weighted combination of plume-rise profiles for one hour.
//!
//! Each contributing profile is reduced to `(bin midpoint, mass)` points,
//! where mass is the bin fraction times the fire's emitted weight for the
//! hour. The combined profile re-bins those points into evenly spaced bins
//! spanning the lowest input bottom to the highest input top, with as many
//! bins as the finest input.

use fm_common::{Error, PlumeriseHour, Result};
use fm_math::{coalesce, even_edges, midpoints, rebin};

use crate::logging::event_names;

/// Intermediate mass distribution for one hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourAggregate {
    /// `(height, mass)` sorted by height, coalesced at equal heights.
    pub points: Vec<(f64, f64)>,
    pub min_height: f64,
    pub max_height: f64,
    pub smolder_mass: f64,
    pub total_mass: f64,
    /// Largest bin count among the inputs.
    pub num_bins: usize,
}

impl HourAggregate {
    /// Re-bin into a plume-rise profile.
    ///
    /// Fractions are bin masses over the total weight, so the combined
    /// profile carries the same fraction sum as the weighted inputs.
    pub fn into_profile(self) -> PlumeriseHour {
        let heights = even_edges(self.min_height, self.max_height, self.num_bins);
        let masses = rebin(&self.points, self.min_height, self.max_height, self.num_bins);

        let (emission_fractions, smolder_fraction) = if self.total_mass > 0.0 {
            (
                masses.iter().map(|m| m / self.total_mass).collect(),
                self.smolder_mass / self.total_mass,
            )
        } else {
            (vec![0.0; self.num_bins], 0.0)
        };

        PlumeriseHour::new(emission_fractions, heights, smolder_fraction)
    }
}

/// Aggregate `(profile, weight)` contributions for `hour`.
///
/// Every profile is validated first. Weights must be finite and
/// non-negative; when they are all zero each profile counts once.
pub fn aggregate_plumerise_hour(
    hour: &str,
    contributions: &[(&PlumeriseHour, f64)],
) -> Result<HourAggregate> {
    let invalid = |reason: &str| Error::InvalidProfile {
        hour: hour.to_string(),
        reason: reason.to_string(),
    };

    if contributions.is_empty() {
        return Err(invalid("no profiles to aggregate"));
    }
    for (profile, weight) in contributions {
        profile.validate(hour)?;
        if !weight.is_finite() || *weight < 0.0 {
            return Err(invalid("emission weight must be finite and non-negative"));
        }
    }

    let equal_weights = contributions.iter().all(|(_, w)| *w == 0.0);
    let weight_of = |w: f64| if equal_weights { 1.0 } else { w };

    let mut raw_points = Vec::new();
    let mut min_height = f64::INFINITY;
    let mut max_height = f64::NEG_INFINITY;
    let mut smolder_mass = 0.0;
    let mut total_mass = 0.0;
    let mut num_bins = 0;

    for (profile, weight) in contributions {
        let w = weight_of(*weight);
        for (mid, fraction) in midpoints(&profile.heights)
            .into_iter()
            .zip(&profile.emission_fractions)
        {
            raw_points.push((mid, fraction * w));
        }
        // validate() guarantees at least two heights
        if let (Some(bottom), Some(top)) = (profile.bottom(), profile.top()) {
            min_height = min_height.min(bottom);
            max_height = max_height.max(top);
        }
        smolder_mass += profile.smolder_fraction * w;
        total_mass += w;
        num_bins = num_bins.max(profile.num_bins());
    }

    tracing::trace!(
        target: event_names::PLUME_HOUR_AGGREGATED,
        hour,
        inputs = contributions.len(),
        min_height,
        max_height,
        total_mass,
        "aggregated plume-rise hour"
    );

    Ok(HourAggregate {
        points: coalesce(&raw_points),
        min_height,
        max_height,
        smolder_mass,
        total_mass,
        num_bins,
    })
}

/// Combine contributions straight into a profile.
pub fn combine_profiles(
    hour: &str,
    contributions: &[(&PlumeriseHour, f64)],
) -> Result<PlumeriseHour> {
    aggregate_plumerise_hour(hour, contributions).map(HourAggregate::into_profile)
}
