//! Spatial plume merging.
//!
//! Fires falling in the same grid cell are folded into a single record
//! placed at their centroid, with plume-rise profiles combined per hour.

use fm_common::{Error, Fire, IdSource, Result, UuidIdSource};
use fm_config::{PlumeMergeConfig, ValidationError};

use super::bucket::bucket_fires;
use super::combine::{combine_fires, Placement};
use crate::logging::event_names;

/// Grid-based plume merger.
#[derive(Debug, Clone)]
pub struct PlumeMerger<S: IdSource = UuidIdSource> {
    config: PlumeMergeConfig,
    ids: S,
}

impl PlumeMerger<UuidIdSource> {
    /// Validates the grid configuration.
    pub fn new(config: PlumeMergeConfig) -> Result<Self> {
        PlumeMerger::with_id_source(config, UuidIdSource)
    }

    /// Build from an untyped `{"grid": {...}}` block.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let config = PlumeMergeConfig::from_value(value).map_err(config_error)?;
        PlumeMerger::new(config)
    }
}

impl<S: IdSource> PlumeMerger<S> {
    pub fn with_id_source(config: PlumeMergeConfig, ids: S) -> Result<Self> {
        config.validate().map_err(config_error)?;
        Ok(PlumeMerger { config, ids })
    }

    pub fn config(&self) -> &PlumeMergeConfig {
        &self.config
    }

    /// Bucket `fires` and fold every bucket into one record.
    pub fn merge(&self, fires: &[Fire]) -> Result<Vec<Fire>> {
        for fire in fires {
            fire.validate()?;
        }

        let buckets = bucket_fires(&self.config.grid, fires);
        tracing::debug!(
            target: event_names::PLUME_BUCKETED,
            fires = fires.len(),
            buckets = buckets.len(),
            "bucketed fires"
        );

        let merged = buckets
            .iter()
            .map(|bucket| self.merge_fires(bucket))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            target: event_names::PLUME_FINISHED,
            input = fires.len(),
            output = merged.len(),
            "plume merge finished"
        );
        Ok(merged)
    }

    /// Fold one bucket. A single fire is returned unchanged.
    pub fn merge_fires(&self, fires: &[&Fire]) -> Result<Fire> {
        match fires {
            [single] => Ok((*single).clone()),
            _ => combine_fires(
                fires,
                self.ids.next_id(),
                Placement::Centroid,
                &self.config.weight_species,
            ),
        }
    }
}

fn config_error(err: ValidationError) -> Error {
    Error::Config(err.to_string())
}
