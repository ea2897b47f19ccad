//! Closed date-time intervals.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A `[start, end]` interval of timezone-naive date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        TimeWindow { start, end }
    }

    /// True when the windows share interior time.
    ///
    /// Windows that merely touch (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True when `other.start` falls at or before this window's end.
    pub fn reaches(&self, other: &TimeWindow) -> bool {
        other.start <= self.end
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
    fn test_overlap_interior() {
        let a = TimeWindow::new(at(17), at(19));
        let b = TimeWindow::new(at(18), at(20));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contiguous_is_not_overlap() {
        let a = TimeWindow::new(at(17), at(19));
        let b = TimeWindow::new(at(19), at(21));
        assert!(!a.overlaps(&b));
        assert!(a.reaches(&b));
    }

    #[test]
    fn test_nested_overlaps() {
        let outer = TimeWindow::new(at(10), at(20));
        let inner = TimeWindow::new(at(12), at(13));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_gapped() {
        let a = TimeWindow::new(at(10), at(11));
        let b = TimeWindow::new(at(12), at(13));
        assert!(!a.overlaps(&b));
        assert!(!a.reaches(&b));
        assert!(b.reaches(&a));
    }
}
