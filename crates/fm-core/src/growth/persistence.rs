//! Persistence growth: project one day's activity onto the following days.

use chrono::{Duration, NaiveDate};

use fm_common::consumption::scale_tree;
use fm_common::{Error, Fire, FireId, Hourly, Result};
use fm_config::{PersistencePlan, PersistenceSetting};

use crate::logging::event_names;

/// Persistence grower for a resolved plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Persistence {
    plan: PersistencePlan,
}

impl Persistence {
    pub fn new(plan: PersistencePlan) -> Self {
        Persistence { plan }
    }

    /// Select the applicable config set for `today`.
    ///
    /// `Ok(None)` when no set's window contains its date to persist.
    pub fn from_setting(setting: &PersistenceSetting, today: NaiveDate) -> Result<Option<Self>> {
        setting
            .select(today)
            .map(|plan| plan.map(Persistence::new))
            .map_err(|e| Error::Config(e.to_string()))
    }

    pub fn plan(&self) -> &PersistencePlan {
        &self.plan
    }

    /// Grow every fire.
    ///
    /// Fires starting before the persisted date pass through. Fires
    /// starting after it pass through unless truncating, in which case
    /// they are dropped. Fires starting on it are kept and followed by one
    /// copy per persisted day.
    pub fn grow(&self, fires: &[Fire]) -> Vec<Fire> {
        let date = self.plan.date_to_persist;
        let mut out = Vec::with_capacity(fires.len());

        for fire in fires {
            let start = fire.start.date();
            if start < date {
                out.push(fire.clone());
            } else if start > date {
                if !self.plan.truncate {
                    out.push(fire.clone());
                }
            } else {
                out.push(fire.clone());
                for (i, pct) in self.plan.daily_percentages.iter().enumerate() {
                    out.push(persisted_copy(fire, i as i64 + 1, *pct));
                }
                tracing::debug!(
                    target: event_names::GROWTH_PERSISTED,
                    fire_id = %fire.id,
                    days = self.plan.days_to_persist(),
                    "persisted fire"
                );
            }
        }
        out
    }
}

/// Copy of `fire` shifted forward `day` days, scaled to `pct` percent.
fn persisted_copy(fire: &Fire, day: i64, pct: f64) -> Fire {
    let shift = Duration::days(day);
    let mut copy = fire.clone();

    copy.id = FireId(format!("{}-persisted-{}", fire.id, day));
    copy.start += shift;
    copy.end += shift;
    copy.meta.insert("persisted".to_string(), serde_json::Value::Bool(true));
    copy.plumerise = shift_keys(&fire.plumerise, shift);
    copy.timeprofiled_area = shift_keys(&fire.timeprofiled_area, shift);
    copy.timeprofiled_emissions = shift_keys(&fire.timeprofiled_emissions, shift);

    if pct < 100.0 {
        let fraction = pct / 100.0;
        copy.area *= fraction;
        copy.heat = copy.heat.map(|h| h * fraction);
        copy.consumption = copy.consumption.as_ref().map(|c| scale_tree(c, fraction));
        for area in copy.timeprofiled_area.values_mut() {
            *area *= fraction;
        }
        for amounts in copy.timeprofiled_emissions.values_mut() {
            for amount in amounts.values_mut() {
                *amount *= fraction;
            }
        }
    }
    copy
}

fn shift_keys<T: Clone>(series: &Hourly<T>, shift: Duration) -> Hourly<T> {
    series
        .iter()
        .map(|(hour, value)| (*hour + shift, value.clone()))
        .collect()
}

/// Apply the configured persistence, if any, to `fires`.
///
/// A missing setting or one with no set matching `today` leaves the fires
/// untouched and logs a warning.
pub fn persist_fires(
    fires: &[Fire],
    setting: Option<&PersistenceSetting>,
    today: NaiveDate,
) -> Result<Vec<Fire>> {
    let Some(setting) = setting else {
        tracing::warn!(
            target: event_names::GROWTH_SKIPPED,
            "Skipping persistence - growth.persistence not configured"
        );
        return Ok(fires.to_vec());
    };

    match Persistence::from_setting(setting, today)? {
        Some(grower) => Ok(grower.grow(fires)),
        None => {
            tracing::warn!(
                target: event_names::GROWTH_SKIPPED,
                "Skipping persistence - date to persist outside of configured time windows"
            );
            Ok(fires.to_vec())
        }
    }
}
