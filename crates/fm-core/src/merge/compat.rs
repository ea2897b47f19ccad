//! Same-fire compatibility.
//!
//! Two records may be folded into one when they sit at the same location,
//! their activity windows do not overlap, and their meta annotations agree
//! on every shared key. Meta values compare as JSON values, so `1` and
//! `1.0` agree.

use fm_common::Fire;
use serde_json::Value;

use super::timewindow::overlaps;

/// Outcome of a compatibility check.
#[derive(Debug, Clone, PartialEq)]
pub enum Compatibility {
    Compatible,
    /// Latitude or longitude differ by more than the tolerance.
    DifferentLocation { d_lat: f64, d_lng: f64 },
    /// Activity windows share interior time.
    OverlappingWindows,
    /// A meta key is present on both with different values.
    MetaConflict { key: String },
}

impl Compatibility {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Compatibility::Compatible)
    }

    /// Short reason label for logging.
    pub fn reason(&self) -> &'static str {
        match self {
            Compatibility::Compatible => "compatible",
            Compatibility::DifferentLocation { .. } => "location",
            Compatibility::OverlappingWindows => "overlap",
            Compatibility::MetaConflict { .. } => "meta_conflict",
        }
    }
}

/// Pairwise compatibility checker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompatibilityChecker {
    /// Maximum |Δlat| and |Δlng| in degrees. Zero means exact equality.
    pub tolerance: f64,
}

impl CompatibilityChecker {
    pub fn new(tolerance: f64) -> Self {
        CompatibilityChecker { tolerance }
    }

    /// Check the pair, reporting the first failed condition.
    pub fn check(&self, a: &Fire, b: &Fire) -> Compatibility {
        let d_lat = (a.latitude - b.latitude).abs();
        let d_lng = (a.longitude - b.longitude).abs();
        if !(d_lat <= self.tolerance && d_lng <= self.tolerance) {
            return Compatibility::DifferentLocation { d_lat, d_lng };
        }

        if overlaps(&a.window(), &b.window()) {
            return Compatibility::OverlappingWindows;
        }

        for (key, value) in &a.meta {
            if let Some(other) = b.meta.get(key) {
                if !values_agree(value, other) {
                    return Compatibility::MetaConflict { key: key.clone() };
                }
            }
        }

        Compatibility::Compatible
    }

    pub fn is_compatible(&self, a: &Fire, b: &Fire) -> bool {
        self.check(a, b).is_compatible()
    }
}

/// JSON value equality where numbers compare by value, not representation.
pub fn values_agree(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_agree(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_agree(x, y)))
        }
        _ => a == b,
    }
}

/// Compatibility with exact location matching.
pub fn compatible(a: &Fire, b: &Fire) -> bool {
    CompatibilityChecker::default().is_compatible(a, b)
}
