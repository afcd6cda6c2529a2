//! Geographic point value type

use serde::{Deserialize, Serialize};

use crate::{Result, TripFrameError};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a point from untrusted input, rejecting non-finite or
    /// out-of-range coordinates.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(latitude, longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(TripFrameError::validation(format!(
                "coordinates out of range: lat={latitude}, lng={longitude}"
            )))
        }
    }

    /// Both coordinates are finite and inside their degree ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Format point as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = TripFrameError;

    /// Parses `"lat,lng"`
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| TripFrameError::validation(format!("expected 'lat,lng', got '{s}'")))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| TripFrameError::validation(format!("invalid latitude '{lat}'")))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|_| TripFrameError::validation(format!("invalid longitude '{lng}'")))?;
        Self::checked(lat, lng)
    }
}
