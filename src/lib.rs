//! `tripframe` - map framing for AI generated travel itineraries
//!
//! The core is [`viewport`]: a spherical centroid and a Mercator zoom
//! estimator that frame a set of points of interest inside a map container.
//! Around it sit the itinerary and hotel models, clients for the external
//! itinerary service, a persistent result cache and a small HTTP host.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod viewport;
pub mod web;

// Re-export core types for public API
pub use config::TripFrameConfig;
pub use error::TripFrameError;
pub use models::{Hotel, Itinerary};
pub use viewport::{
    GeoPoint, MapCamera, Viewport, ViewportSize, compute_center, compute_zoom, frame,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripFrameError>;
