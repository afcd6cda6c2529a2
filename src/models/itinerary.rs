//! Itinerary model and point-of-interest extraction

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::place::{DisplayName, PlaceLocation, Photo};
use crate::viewport::{self, GeoPoint, Viewport, ViewportSize};
use crate::{Result, TripFrameError};

/// Highest crowd density the service reports
const MAX_DENSITY: f64 = 5.0;

/// A generated travel itinerary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    #[serde(default)]
    pub itinerary_title: Option<String>,
    #[serde(default)]
    pub general_location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: Vec<DaySchedule>,
    #[serde(default)]
    pub extras: Option<Extras>,
    #[serde(default)]
    pub user_warn: Option<String>,
    /// Parameters the itinerary was generated from; set on cached responses
    #[serde(default, rename = "userQuery")]
    pub user_query: Option<UserQuery>,
}

/// One day of the schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub day: Option<Value>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// A scheduled activity at a place
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<DisplayName>,
    #[serde(default)]
    pub location: Option<PlaceLocation>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_action: Option<String>,
    #[serde(default)]
    pub time_in_out: Option<String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// Crowd density estimate for the destination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extras {
    #[serde(default)]
    pub p_density: Option<f64>,
    #[serde(default)]
    pub p_density_expl: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    #[serde(default)]
    pub what: Option<String>,
    #[serde(default, rename = "where")]
    pub where_: Option<String>,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Result of a generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItinerary {
    pub itinerary: Itinerary,
    /// Served from the service's cache; no generation credit was spent
    pub cached: bool,
}

impl Activity {
    /// Map position of the activity, if it has valid coordinates
    #[must_use]
    pub fn point(&self) -> Option<GeoPoint> {
        self.location.as_ref().and_then(PlaceLocation::point)
    }

    /// Display name of the place, if the service sent one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.display_name.as_ref().map(|name| name.text.as_str())
    }
}

impl DaySchedule {
    /// Positions of the activities that have coordinates, in schedule order
    #[must_use]
    pub fn points(&self) -> Vec<GeoPoint> {
        self.activities.iter().filter_map(Activity::point).collect()
    }
}

impl Itinerary {
    /// Unwrap the body of a generation response.
    ///
    /// The service returns `{ "cached": bool, "itinerary": ... }` where the
    /// itinerary is either an object or an array whose first element is used.
    pub fn from_response(body: Value) -> Result<GeneratedItinerary> {
        let cached = body.get("cached").and_then(Value::as_bool).unwrap_or(false);
        let itinerary = match body.get("itinerary") {
            Some(Value::Array(items)) => items.first().cloned().ok_or_else(|| {
                TripFrameError::api("generation response contained an empty itinerary list")
            })?,
            Some(item @ Value::Object(_)) => item.clone(),
            _ => {
                return Err(TripFrameError::api(
                    "generation response is missing the itinerary",
                ));
            }
        };
        Ok(GeneratedItinerary {
            itinerary: serde_json::from_value(itinerary)?,
            cached,
        })
    }

    #[must_use]
    pub fn day_count(&self) -> usize {
        self.schedule.len()
    }

    /// Points of interest of one day; empty when the day does not exist
    #[must_use]
    pub fn day_pois(&self, day_index: usize) -> Vec<GeoPoint> {
        self.schedule
            .get(day_index)
            .map(DaySchedule::points)
            .unwrap_or_default()
    }

    /// Points of interest across the whole trip
    #[must_use]
    pub fn all_pois(&self) -> Vec<GeoPoint> {
        self.schedule.iter().flat_map(DaySchedule::points).collect()
    }

    /// Center of the whole trip, used to look for hotels
    #[must_use]
    pub fn trip_center(&self) -> Option<GeoPoint> {
        viewport::compute_center(&self.all_pois())
    }

    /// Map camera for one day. `None` for a missing day or a day without
    /// any located activity.
    #[must_use]
    pub fn day_viewport(&self, day_index: usize, size: ViewportSize) -> Option<Viewport> {
        viewport::frame(&self.day_pois(day_index), size)
    }

    /// Map camera covering every day
    #[must_use]
    pub fn trip_viewport(&self, size: ViewportSize) -> Option<Viewport> {
        viewport::frame(&self.all_pois(), size)
    }

    /// A warning to show the traveller, if the service attached a
    /// non-blank one
    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        self.user_warn
            .as_deref()
            .map(str::trim)
            .filter(|warn| !warn.is_empty())
    }
}

/// Hue for a crowd density in `[0, 5]`: 120 (green) when empty down to
/// 0 (red) when packed. Out-of-range values are clamped.
#[must_use]
pub fn crowd_density_hue(density: f64) -> f64 {
    let value = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, MAX_DENSITY)
    };
    120.0 - 120.0 * (value / MAX_DENSITY)
}

/// CSS color for a crowd density
#[must_use]
pub fn crowd_density_color(density: f64) -> String {
    format!("hsl({}, 80%, 45%)", crowd_density_hue(density))
}
