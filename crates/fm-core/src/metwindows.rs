//! UTC time windows needing meteorology data.

use fm_common::{Error, Fire, Result, TimeWindow};
use fm_config::Config;

use crate::logging::event_names;
use crate::merge::merge_time_windows;

/// Reconciled UTC windows covering every fire's activity plus the
/// configured dispersion run and explicit met window, when present.
///
/// Fails with [`Error::InvalidFire`] for an unusable record and with
/// [`Error::NoTimeWindows`] when there is nothing to cover.
pub fn met_time_windows(fires: &[Fire], config: &Config) -> Result<Vec<TimeWindow>> {
    let mut windows = Vec::with_capacity(fires.len() + 2);
    for fire in fires {
        fire.validate()?;
        windows.push(fire.utc_window()?);
    }

    if let Some(dispersion) = &config.dispersion {
        let (start, end) = dispersion.bounds();
        windows.push(TimeWindow::new(start, end));
    }
    if let Some(window) = &config.findmetdata.time_window {
        let (start, end) = window.bounds();
        windows.push(TimeWindow::new(start, end));
    }

    if windows.is_empty() {
        return Err(Error::NoTimeWindows);
    }

    let merged = merge_time_windows(&windows);
    tracing::debug!(
        target: event_names::WINDOWS_COMPUTED,
        fires = fires.len(),
        windows = merged.len(),
        "computed met time windows"
    );
    Ok(merged)
}
