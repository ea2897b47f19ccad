//! Spatial grid for plume merging.
//!
//! ```json
//! "grid": {
//!     "spacing": 0.5,
//!     "boundary": {
//!         "sw": { "lat": 30, "lng": -120 },
//!         "ne": { "lat": 40, "lng": -110 }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::validate::{require_finite, ValidationError, ValidationResult};

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Rectangular merge domain.
///
/// Corners given the wrong way round are accepted; [`Boundary::lat_range`]
/// and [`Boundary::lng_range`] always return `(min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl Boundary {
    pub fn lat_range(&self) -> (f64, f64) {
        (self.sw.lat.min(self.ne.lat), self.sw.lat.max(self.ne.lat))
    }

    pub fn lng_range(&self) -> (f64, f64) {
        (self.sw.lng.min(self.ne.lng), self.sw.lng.max(self.ne.lng))
    }

    /// True when the point lies inside the boundary, edges included.
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        let (lat_min, lat_max) = self.lat_range();
        let (lng_min, lng_max) = self.lng_range();
        lat_min <= lat && lat <= lat_max && lng_min <= lng && lng <= lng_max
    }

    fn validate(&self) -> ValidationResult<()> {
        require_finite("grid.boundary.sw.lat", self.sw.lat)?;
        require_finite("grid.boundary.sw.lng", self.sw.lng)?;
        require_finite("grid.boundary.ne.lat", self.ne.lat)?;
        require_finite("grid.boundary.ne.lng", self.ne.lng)?;
        Ok(())
    }
}

/// Regular lat/lng grid over a bounded domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cell size, degrees.
    pub spacing: f64,
    pub boundary: Boundary,
}

impl GridConfig {
    pub fn new(spacing: f64, sw: LatLng, ne: LatLng) -> Self {
        GridConfig {
            spacing,
            boundary: Boundary { sw, ne },
        }
    }

    /// Cell `(row, col)` for a point inside the boundary, `None` outside.
    pub fn cell(&self, lat: f64, lng: f64) -> Option<(i64, i64)> {
        if !self.boundary.contains(lat, lng) {
            return None;
        }
        let (lat_min, _) = self.boundary.lat_range();
        let (lng_min, _) = self.boundary.lng_range();
        let row = ((lat - lat_min) / self.spacing).floor() as i64;
        let col = ((lng - lng_min) / self.spacing).floor() as i64;
        Some((row, col))
    }

    pub fn validate(&self) -> ValidationResult<()> {
        require_finite("grid.spacing", self.spacing)?;
        if self.spacing <= 0.0 {
            return Err(ValidationError::invalid(
                "grid.spacing",
                format!("Must be positive, got {}", self.spacing),
            ));
        }
        self.boundary.validate()
    }
}
