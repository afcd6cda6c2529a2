//! Data models for itineraries and hotels
//!
//! The shapes follow the JSON returned by the itinerary-generation and
//! hotel-search services:
//! - Place: coordinates, names and photos shared by activities and hotels
//! - Itinerary: day schedules, activities and crowd density extras
//! - Hotel: hotel search results

pub mod hotel;
pub mod itinerary;
pub mod place;

pub use hotel::{Hotel, HotelPrice, compare_by_price, sort_by_price};
pub use itinerary::{
    Activity, DaySchedule, Extras, GeneratedItinerary, Itinerary, UserQuery,
    crowd_density_color, crowd_density_hue,
};
pub use place::{DisplayName, PlaceLocation, Photo, place_url};
