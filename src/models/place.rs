//! Building blocks shared by activities and hotels

use serde::{Deserialize, Serialize};

use crate::viewport::GeoPoint;

/// Location block of a place; either coordinate may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaceLocation {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl PlaceLocation {
    /// The location as a point, if both coordinates are present and valid.
    ///
    /// `0.0` is a real coordinate (the equator, the prime meridian) and is
    /// kept.
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        let point = GeoPoint::new(self.latitude?, self.longitude?);
        point.is_valid().then_some(point)
    }
}

impl From<GeoPoint> for PlaceLocation {
    fn from(point: GeoPoint) -> Self {
        Self {
            latitude: Some(point.latitude),
            longitude: Some(point.longitude),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayName {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub secure_url: String,
}

/// Google Maps link for a place id
#[must_use]
pub fn place_url(place_id: &str) -> String {
    format!(
        "https://www.google.com/maps/place/?q=place_id:{}",
        urlencoding::encode(place_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(46.0), Some(8.0), Some(GeoPoint::new(46.0, 8.0)))]
    #[case(Some(0.0), Some(0.0), Some(GeoPoint::new(0.0, 0.0)))]
    #[case(None, Some(8.0), None)]
    #[case(Some(46.0), None, None)]
    #[case(Some(123.0), Some(8.0), None)]
    fn test_location_point(
        #[case] latitude: Option<f64>,
        #[case] longitude: Option<f64>,
        #[case] expected: Option<GeoPoint>,
    ) {
        let location = PlaceLocation {
            latitude,
            longitude,
        };
        assert_eq!(location.point(), expected);
    }

    #[test]
    fn test_place_url() {
        assert_eq!(
            place_url("ChIJD7fiBh9u5kcRYJSMaMOCCwQ"),
            "https://www.google.com/maps/place/?q=place_id:ChIJD7fiBh9u5kcRYJSMaMOCCwQ"
        );
    }
}
