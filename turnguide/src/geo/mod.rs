//! Geographic primitives.
//!
//! Provides the [`GeoPoint`] value type with geodetic bounds validation
//! and the [`DistanceCalc`] proximity seam with its default
//! great-circle implementation.
//!
//! Bounds are enforced at construction so downstream consumers (the
//! tracker in particular) never need to re-validate coordinates.

mod distance;

pub use distance::{DistanceCalc, GreatCircle, EARTH_RADIUS_M};

use std::fmt;

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors raised when constructing a [`GeoPoint`] from raw coordinates.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// Latitude outside [-90, 90] degrees.
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180] degrees.
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// Immutable latitude/longitude pair in degrees.
///
/// Construction validates geodetic bounds; a `GeoPoint` that exists is
/// always in range. NaN coordinates are rejected by the same check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    /// Create a point, validating latitude ∈ [-90, 90] and
    /// longitude ∈ [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
