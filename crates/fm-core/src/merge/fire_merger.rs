//! Greedy same-location fire merging.

use fm_common::{Fire, IdSource, Result, UuidIdSource};
use fm_config::MergeConfig;

use super::combine::{combine_fires, Placement};
use super::compat::{Compatibility, CompatibilityChecker};
use crate::logging::event_names;

/// Folds records of the same fire into one.
///
/// Each pass scans pairs `(i, j)`, `i < j`, from the start of the working
/// list. The first compatible pair is replaced by a merged record at
/// position `i` and record `j` is removed; scanning then restarts. Merging
/// stops when no pair is compatible.
#[derive(Debug, Clone)]
pub struct FireMerger<S: IdSource = UuidIdSource> {
    checker: CompatibilityChecker,
    weight_species: String,
    ids: S,
}

impl FireMerger<UuidIdSource> {
    pub fn new(config: &MergeConfig) -> Self {
        FireMerger::with_id_source(config, UuidIdSource)
    }
}

impl Default for FireMerger<UuidIdSource> {
    fn default() -> Self {
        FireMerger::new(&MergeConfig::default())
    }
}

impl<S: IdSource> FireMerger<S> {
    pub fn with_id_source(config: &MergeConfig, ids: S) -> Self {
        FireMerger {
            checker: CompatibilityChecker::new(config.location_tolerance),
            weight_species: config.weight_species.clone(),
            ids,
        }
    }

    /// Merge every compatible pair. Inputs are never modified.
    ///
    /// A single record (or none) is returned as-is.
    pub fn merge(&self, fires: &[Fire]) -> Result<Vec<Fire>> {
        for fire in fires {
            fire.validate()?;
        }

        let mut working = fires.to_vec();
        if working.len() < 2 {
            return Ok(working);
        }

        tracing::debug!(
            target: event_names::MERGE_STARTED,
            fires = working.len(),
            "merging same-location fires"
        );

        while let Some((i, j)) = self.find_compatible_pair(&working) {
            let merged = combine_fires(
                &[&working[i], &working[j]],
                self.ids.next_id(),
                Placement::First,
                &self.weight_species,
            )?;
            tracing::debug!(
                target: event_names::MERGE_PAIR_MERGED,
                fire_id = %merged.id,
                first = %working[i].id,
                second = %working[j].id,
                "merged fire pair"
            );
            working[i] = merged;
            working.remove(j);
        }

        tracing::debug!(
            target: event_names::MERGE_FINISHED,
            input = fires.len(),
            output = working.len(),
            "fire merge finished"
        );
        Ok(working)
    }

    fn find_compatible_pair(&self, fires: &[Fire]) -> Option<(usize, usize)> {
        for i in 0..fires.len() {
            for j in (i + 1)..fires.len() {
                match self.checker.check(&fires[i], &fires[j]) {
                    Compatibility::Compatible => return Some((i, j)),
                    reason => {
                        tracing::trace!(
                            target: event_names::MERGE_PAIR_SKIPPED,
                            first = %fires[i].id,
                            second = %fires[j].id,
                            reason = reason.reason(),
                            "fires not mergeable"
                        );
                    }
                }
            }
        }
        None
    }
}
