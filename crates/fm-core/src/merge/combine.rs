//! Folding several fire records into one.
//!
//! Shared by the same-location merger (two compatible records at a time)
//! and the plume merger (every record of a grid cell at once).

use std::collections::BTreeSet;

use fm_common::consumption::sum_optional;
use fm_common::{Fire, FireId, Hourly, PlumeriseHour, Result, SpeciesAmounts, HOUR_FORMAT};

use super::plumerise::combine_profiles;

/// Where the combined record is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Location of the first record.
    First,
    /// Arithmetic mean of every record's location.
    Centroid,
}

/// Build one record out of `fires` (at least one).
///
/// Meta keys are unioned with later records overriding earlier ones.
/// Per-hour area and emissions are summed on shared hours; plume-rise
/// profiles on shared hours are combined weighted by `weight_species`.
/// `utc_offset` comes from the first record.
pub fn combine_fires(
    fires: &[&Fire],
    id: FireId,
    placement: Placement,
    weight_species: &str,
) -> Result<Fire> {
    let Some(first) = fires.first() else {
        return Err(fm_common::Error::InvalidFire {
            fire_id: id.0,
            reason: "nothing to combine".to_string(),
        });
    };

    let mut combined = Fire::new(
        id,
        first.start,
        first.end,
        0.0,
        first.latitude,
        first.longitude,
    )
    .with_utc_offset(first.utc_offset);
    combined.original_fire_ids = BTreeSet::new();

    for fire in fires {
        combined
            .original_fire_ids
            .extend(fire.original_fire_ids.iter().cloned());
        for (key, value) in &fire.meta {
            combined.meta.insert(key.clone(), value.clone());
        }
        combined.start = combined.start.min(fire.start);
        combined.end = combined.end.max(fire.end);
        combined.area += fire.area;
        combined.heat = sum_heat(combined.heat, fire.heat);
        combined.consumption =
            sum_optional(combined.consumption.as_ref(), fire.consumption.as_ref())?;
        combined.timeprofiled_area =
            sum_hourly(&combined.timeprofiled_area, &fire.timeprofiled_area);
        combined.timeprofiled_emissions =
            sum_hourly_emissions(&combined.timeprofiled_emissions, &fire.timeprofiled_emissions);
    }

    if placement == Placement::Centroid {
        let n = fires.len() as f64;
        combined.latitude = fires.iter().map(|f| f.latitude).sum::<f64>() / n;
        combined.longitude = fires.iter().map(|f| f.longitude).sum::<f64>() / n;
    }

    combined.plumerise = combine_plumerise(fires, weight_species)?;
    Ok(combined)
}

fn sum_heat(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(v), None) | (None, Some(v)) => Some(v),
        (None, None) => None,
    }
}

/// Union by hour, summing shared hours.
pub fn sum_hourly(a: &Hourly<f64>, b: &Hourly<f64>) -> Hourly<f64> {
    let mut out = a.clone();
    for (hour, value) in b {
        *out.entry(*hour).or_insert(0.0) += value;
    }
    out
}

/// Union by hour, summing each species on shared hours.
pub fn sum_hourly_emissions(
    a: &Hourly<SpeciesAmounts>,
    b: &Hourly<SpeciesAmounts>,
) -> Hourly<SpeciesAmounts> {
    let mut out = a.clone();
    for (hour, amounts) in b {
        let slot = out.entry(*hour).or_default();
        for (species, amount) in amounts {
            *slot.entry(species.clone()).or_insert(0.0) += amount;
        }
    }
    out
}

/// Union of every record's profiles by hour.
///
/// A profile provided by a single record is copied as-is; hours with
/// several providers are combined, each weighted by its record's emitted
/// `weight_species` for that hour (zero when not reported).
pub fn combine_plumerise(fires: &[&Fire], weight_species: &str) -> Result<Hourly<PlumeriseHour>> {
    let hours: BTreeSet<_> = fires
        .iter()
        .flat_map(|f| f.plumerise.keys().copied())
        .collect();

    let mut out = Hourly::new();
    for hour in hours {
        let providers: Vec<(&PlumeriseHour, f64)> = fires
            .iter()
            .filter_map(|f| {
                f.plumerise
                    .get(&hour)
                    .map(|p| (p, f.emissions_at(&hour, weight_species).unwrap_or(0.0)))
            })
            .collect();

        let profile = match providers.as_slice() {
            [(single, _)] => (*single).clone(),
            _ => combine_profiles(&hour.format(HOUR_FORMAT).to_string(), &providers)?,
        };
        out.insert(hour, profile);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use fm_common::{Consumption, ConsumptionTree};

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 8, 4)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn species(pm: f64) -> SpeciesAmounts {
        [("CO".to_string(), 1.0), ("PM2.5".to_string(), pm)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_sum_hourly_union() {
        let a: Hourly<f64> = [(at(17), 12.0), (at(18), 1.0)].into_iter().collect();
        let b: Hourly<f64> = [(at(18), 2.0), (at(19), 10.0)].into_iter().collect();
        let sum = sum_hourly(&a, &b);
        assert_eq!(sum.len(), 3);
        assert_eq!(sum[&at(18)], 3.0);
    }

    #[test]
    fn test_sum_hourly_emissions() {
        let a: Hourly<SpeciesAmounts> = [(at(17), species(4.0))].into_iter().collect();
        let b: Hourly<SpeciesAmounts> = [(at(17), species(5.0))].into_iter().collect();
        let sum = sum_hourly_emissions(&a, &b);
        assert_eq!(sum[&at(17)]["PM2.5"], 9.0);
        assert_eq!(sum[&at(17)]["CO"], 2.0);
    }

    #[test]
    fn test_combine_first_placement() {
        let a = Fire::new("a", at(17), at(19), 120.0, 47.41, -121.41)
            .with_utc_offset(-7.0)
            .with_heat(1e6)
            .with_meta("foo", "bar");
        let b = Fire::new("b", at(19), at(21), 100.0, 47.41, -121.41)
            .with_heat(3e6)
            .with_meta("bar", "asdasd");

        let c = combine_fires(&[&a, &b], FireId::from("c"), Placement::First, "PM2.5").unwrap();
        assert_eq!(c.id.as_str(), "c");
        assert_eq!(c.start, at(17));
        assert_eq!(c.end, at(21));
        assert_eq!(c.area, 220.0);
        assert_eq!(c.heat, Some(4e6));
        assert_eq!(c.utc_offset, -7.0);
        assert_eq!(c.meta.len(), 2);
        assert_eq!(
            c.original_fire_ids.iter().cloned().collect::<Vec<_>>(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_combine_centroid_placement() {
        let a = Fire::new("a", at(17), at(19), 1.0, 47.4, -121.5);
        let b = Fire::new("b", at(17), at(19), 1.0, 47.6, -121.7);
        let c = combine_fires(&[&a, &b], FireId::from("c"), Placement::Centroid, "PM2.5").unwrap();
        assert!((c.latitude - 47.5).abs() < 1e-9);
        assert!((c.longitude + 121.6).abs() < 1e-9);
    }

    #[test]
    fn test_consumption_one_sided() {
        let tree: ConsumptionTree = [("flaming".to_string(), Consumption::Amount(5.0))]
            .into_iter()
            .collect();
        let a = Fire::new("a", at(17), at(19), 1.0, 0.0, 0.0).with_consumption(tree.clone());
        let b = Fire::new("b", at(19), at(20), 1.0, 0.0, 0.0);
        let c = combine_fires(&[&a, &b], FireId::from("c"), Placement::First, "PM2.5").unwrap();
        assert_eq!(c.consumption, Some(tree));
        assert_eq!(c.heat, None);
    }

    #[test]
    fn test_single_provider_profile_copied() {
        let p = PlumeriseHour::new(vec![0.3, 0.7], vec![10.0, 20.0, 40.0], 0.0);
        let a = Fire::new("a", at(17), at(19), 1.0, 0.0, 0.0).with_plumerise(at(17), p.clone());
        let b = Fire::new("b", at(19), at(20), 1.0, 0.0, 0.0);
        let out = combine_plumerise(&[&a, &b], "PM2.5").unwrap();
        assert_eq!(out[&at(17)], p);
    }
}
