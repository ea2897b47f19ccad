//! The fire record.
//!
//! A fire is one logical wildland fire event: a location, a local-time
//! activity window, and the physical quantities computed for it upstream
//! (hourly area and emissions, plume-rise profiles, consumption, heat).
//! Records are immutable by convention once loaded; merging always builds
//! new records.

use chrono::{NaiveDateTime, TimeDelta};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::consumption::ConsumptionTree;
use crate::error::{Error, Result};
use crate::id::FireId;
use crate::profile::PlumeriseHour;
use crate::window::TimeWindow;

/// Hour key of the per-hour series, local standard time.
///
/// Serialized as `YYYY-MM-DDTHH:MM:SS`.
pub type Hour = NaiveDateTime;

/// A per-hour series.
pub type Hourly<T> = BTreeMap<Hour, T>;

/// Emitted amount per species (e.g. `"PM2.5"`, `"CO"`).
pub type SpeciesAmounts = BTreeMap<String, f64>;

/// Free-form annotations carried through merges.
pub type Meta = BTreeMap<String, serde_json::Value>;

/// Format used for hour keys in messages.
pub const HOUR_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Largest accepted `utc_offset` magnitude, hours.
pub const MAX_UTC_OFFSET_HOURS: f64 = 24.0;

/// A single fire record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Fire {
    pub id: FireId,

    /// Ids of the source records folded into this one. Defaults to `{id}`
    /// when a loaded document omits it.
    #[serde(default)]
    pub original_fire_ids: BTreeSet<String>,

    #[serde(default)]
    pub meta: Meta,

    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    /// Burned area, acres.
    pub area: f64,

    pub latitude: f64,
    pub longitude: f64,

    /// Offset of local standard time from UTC, hours.
    #[serde(default)]
    pub utc_offset: f64,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plumerise: Hourly<PlumeriseHour>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub timeprofiled_area: Hourly<f64>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub timeprofiled_emissions: Hourly<SpeciesAmounts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<ConsumptionTree>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat: Option<f64>,
}

impl Fire {
    /// Create a fire with no derived data. `original_fire_ids` starts as `{id}`.
    pub fn new(
        id: impl Into<FireId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        area: f64,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let id = id.into();
        let mut original_fire_ids = BTreeSet::new();
        original_fire_ids.insert(id.0.clone());
        Fire {
            id,
            original_fire_ids,
            meta: Meta::new(),
            start,
            end,
            area,
            latitude,
            longitude,
            utc_offset: 0.0,
            plumerise: Hourly::new(),
            timeprofiled_area: Hourly::new(),
            timeprofiled_emissions: Hourly::new(),
            consumption: None,
            heat: None,
        }
    }

    pub fn with_original_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.original_fire_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_meta(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn with_utc_offset(mut self, hours: f64) -> Self {
        self.utc_offset = hours;
        self
    }

    pub fn with_plumerise(mut self, hour: Hour, profile: PlumeriseHour) -> Self {
        self.plumerise.insert(hour, profile);
        self
    }

    pub fn with_area_at(mut self, hour: Hour, area: f64) -> Self {
        self.timeprofiled_area.insert(hour, area);
        self
    }

    pub fn with_emissions_at(mut self, hour: Hour, amounts: SpeciesAmounts) -> Self {
        self.timeprofiled_emissions.insert(hour, amounts);
        self
    }

    pub fn with_consumption(mut self, consumption: ConsumptionTree) -> Self {
        self.consumption = Some(consumption);
        self
    }

    pub fn with_heat(mut self, heat: f64) -> Self {
        self.heat = Some(heat);
        self
    }

    /// Activity window in local standard time.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Activity window shifted to UTC.
    ///
    /// Fails when the offset is out of range or the shift leaves the
    /// representable date range.
    pub fn utc_window(&self) -> Result<TimeWindow> {
        let invalid = || self.invalid("utc_offset moves the activity window out of range");
        if !self.utc_offset.is_finite() || self.utc_offset.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(invalid());
        }

        let offset = TimeDelta::try_seconds((self.utc_offset * 3600.0).round() as i64)
            .ok_or_else(invalid)?;
        let start = self.start.checked_sub_signed(offset).ok_or_else(invalid)?;
        let end = self.end.checked_sub_signed(offset).ok_or_else(invalid)?;
        Ok(TimeWindow::new(start, end))
    }

    /// Fill an empty `original_fire_ids` with the record's own id.
    pub fn seed_original_ids(&mut self) {
        if self.original_fire_ids.is_empty() {
            self.original_fire_ids.insert(self.id.0.clone());
        }
    }

    /// Emitted amount of `species` during `hour`, if reported.
    pub fn emissions_at(&self, hour: &Hour, species: &str) -> Option<f64> {
        self.timeprofiled_emissions
            .get(hour)
            .and_then(|amounts| amounts.get(species))
            .copied()
    }

    /// Check the record is usable by the merge engine.
    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(self.invalid("start is after end"));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(self.invalid("coordinates must be finite"));
        }
        if !self.area.is_finite() {
            return Err(self.invalid("area must be finite"));
        }
        if !self.utc_offset.is_finite() || self.utc_offset.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(self.invalid("utc_offset must be within 24 hours of UTC"));
        }
        for (hour, profile) in &self.plumerise {
            profile.validate(&hour.format(HOUR_FORMAT).to_string())?;
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> Error {
        Error::InvalidFire {
            fire_id: self.id.0.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Top-level document exchanged with loaders and exporters.
///
/// Loading seeds each record's `original_fire_ids` with its own id when the
/// field is absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
pub struct FireDocument {
    #[serde(default)]
    pub fires: Vec<Fire>,
}

impl FireDocument {
    pub fn new(fires: Vec<Fire>) -> Self {
        FireDocument { fires }
    }
}

impl<'de> Deserialize<'de> for FireDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Loaded {
            #[serde(default)]
            fires: Vec<Fire>,
        }

        let mut loaded = Loaded::deserialize(deserializer)?;
        for fire in &mut loaded.fires {
            fire.seed_original_ids();
        }
        Ok(FireDocument::new(loaded.fires))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 8, 4)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_new_seeds_original_ids() {
        let fire = Fire::new("abc", at(17), at(19), 120.0, 47.41, -121.41);
        assert_eq!(fire.original_fire_ids.len(), 1);
        assert!(fire.original_fire_ids.contains("abc"));
        assert!(fire.validate().is_ok());
    }

    #[test]
    fn test_start_after_end_invalid() {
        let fire = Fire::new("abc", at(19), at(17), 1.0, 0.0, 0.0);
        let err = fire.validate().unwrap_err();
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn test_bad_profile_invalid() {
        let fire = Fire::new("abc", at(17), at(19), 1.0, 0.0, 0.0).with_plumerise(
            at(17),
            PlumeriseHour::new(vec![1.0], vec![0.0], 0.0),
        );
        let err = fire.validate().unwrap_err();
        assert!(err.to_string().contains("2015-08-04T17:00:00"));
    }

    fn next_day(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 8, 5)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_utc_window() {
        let fire = Fire::new("abc", at(17), at(19), 1.0, 0.0, 0.0).with_utc_offset(-7.0);
        let w = fire.utc_window().unwrap();
        assert_eq!(w.start, next_day(0));
        assert_eq!(w.end, next_day(2));
    }

    #[test]
    fn test_huge_utc_offset_is_invalid_fire() {
        for offset in [1e10, -1e10, f64::NAN, f64::INFINITY, 24.5] {
            let fire = Fire::new("abc", at(17), at(19), 1.0, 0.0, 0.0).with_utc_offset(offset);
            assert_eq!(fire.utc_window().unwrap_err().code(), 20, "offset {}", offset);
            assert_eq!(fire.validate().unwrap_err().code(), 20, "offset {}", offset);
        }
    }

    #[test]
    fn test_utc_window_past_calendar_end() {
        let end = NaiveDateTime::MAX;
        let fire = Fire::new("abc", end, end, 1.0, 0.0, 0.0).with_utc_offset(-12.0);
        let err = fire.utc_window().unwrap_err();
        assert!(err.to_string().contains("utc_offset"));
    }

    #[test]
    fn test_missing_original_ids_default_to_own_id() {
        let json = r#"{"fires": [
            {"id": "a", "start": "2015-08-04T17:00:00", "end": "2015-08-04T19:00:00",
             "area": 1.0, "latitude": 47.0, "longitude": -121.0},
            {"id": "b", "original_fire_ids": [], "start": "2015-08-04T17:00:00",
             "end": "2015-08-04T19:00:00", "area": 1.0, "latitude": 47.0, "longitude": -121.0},
            {"id": "c", "original_fire_ids": ["x", "y"], "start": "2015-08-04T17:00:00",
             "end": "2015-08-04T19:00:00", "area": 1.0, "latitude": 47.0, "longitude": -121.0}
        ]}"#;
        let doc: FireDocument = serde_json::from_str(json).unwrap();
        let ids: Vec<Vec<&str>> = doc
            .fires
            .iter()
            .map(|f| f.original_fire_ids.iter().map(String::as_str).collect())
            .collect();
        assert_eq!(ids, vec![vec!["a"], vec!["b"], vec!["x", "y"]]);
    }

    #[test]
    fn test_emissions_at() {
        let mut amounts = SpeciesAmounts::new();
        amounts.insert("PM2.5".into(), 4.0);
        let fire =
            Fire::new("abc", at(17), at(19), 1.0, 0.0, 0.0).with_emissions_at(at(17), amounts);
        assert_eq!(fire.emissions_at(&at(17), "PM2.5"), Some(4.0));
        assert_eq!(fire.emissions_at(&at(17), "CO"), None);
        assert_eq!(fire.emissions_at(&at(18), "PM2.5"), None);
    }

    #[test]
    fn test_document_json_shape() {
        let json = r#"{
            "fires": [{
                "id": "SF11C14225236095807750-0",
                "original_fire_ids": ["SF11C14225236095807750"],
                "meta": {"foo": "bar"},
                "start": "2015-08-04T17:00:00",
                "end": "2015-08-04T19:00:00",
                "area": 120.0, "latitude": 47.41, "longitude": -121.41, "utc_offset": -7.0,
                "plumerise": {
                    "2015-08-04T17:00:00": {
                        "emission_fractions": [0.5, 0.5],
                        "heights": [100.0, 200.0, 300.0],
                        "smolder_fraction": 0.0
                    }
                },
                "timeprofiled_area": {"2015-08-04T17:00:00": 12.0},
                "timeprofiled_emissions": {
                    "2015-08-04T17:00:00": {"CO": 0.0, "PM2.5": 4.0}
                },
                "consumption": {"flaming": 1311.2, "total": 4027.6},
                "heat": 1000000.0
            }]
        }"#;
        let doc: FireDocument = serde_json::from_str(json).unwrap();
        let fire = &doc.fires[0];
        assert_eq!(fire.meta["foo"], serde_json::json!("bar"));
        assert_eq!(fire.timeprofiled_area[&at(17)], 12.0);
        assert_eq!(fire.heat, Some(1_000_000.0));

        let out = serde_json::to_value(&doc).unwrap();
        assert!(out["fires"][0]["plumerise"]
            .get("2015-08-04T17:00:00")
            .is_some());
        let back: FireDocument = serde_json::from_value(out).unwrap();
        assert_eq!(back, doc);
    }
}
