//! Interval reconciliation.

use fm_common::TimeWindow;

/// Collapse overlapping, nested and contiguous windows.
///
/// Windows are stably sorted by start and folded in a single scan: a window
/// joins the running one when it starts at or before the running end.
/// The result is ordered by start. The input is left untouched.
pub fn merge_time_windows(windows: &[TimeWindow]) -> Vec<TimeWindow> {
    let mut sorted = windows.to_vec();
    sorted.sort_by_key(|w| w.start);

    let mut merged: Vec<TimeWindow> = Vec::with_capacity(sorted.len());
    for window in sorted {
        match merged.last_mut() {
            Some(running) if running.reaches(&window) => {
                running.end = running.end.max(window.end);
            }
            _ => merged.push(window),
        }
    }
    merged
}

/// True when the windows share interior time. Touching endpoints do not
/// count.
pub fn overlaps(a: &TimeWindow, b: &TimeWindow) -> bool {
    a.overlaps(b)
}
