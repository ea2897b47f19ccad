//! Fuzz target for time window reconciliation.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, Duration};
use fm_common::TimeWindow;
use fm_core::merge::merge_time_windows;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RawWindow {
    start_hour: u16,
    hours: u8,
}

fuzz_target!(|raw: Vec<RawWindow>| {
    let base = DateTime::UNIX_EPOCH.naive_utc();
    let windows: Vec<TimeWindow> = raw
        .iter()
        .map(|w| {
            let start = base + Duration::hours(i64::from(w.start_hour));
            TimeWindow::new(start, start + Duration::hours(i64::from(w.hours)))
        })
        .collect();

    let merged = merge_time_windows(&windows);
    for pair in merged.windows(2) {
        assert!(pair[0].end < pair[1].start);
    }
});
