//! Viewport framing
//!
//! Given the points of interest of an itinerary day (or a whole trip) and the
//! pixel size of the map container, works out where to center the map and
//! which integer zoom level keeps every point visible on a standard
//! 256 px square-tile web map.
//!
//! Everything in here is a pure function of its inputs. Hosts re-invoke
//! [`frame`] (or use [`MapCamera`]) whenever the point set or the container
//! size changes.

pub mod camera;
pub mod center;
pub mod point;
pub mod size;
pub mod zoom;

use serde::{Deserialize, Serialize};

pub use camera::MapCamera;
pub use center::compute_center;
pub use point::GeoPoint;
pub use size::ViewportSize;
pub use zoom::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, SINGLE_POINT_ZOOM, TILE_SIZE, compute_zoom};

/// Map camera position derived from a point set and a container size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
}

/// Frame `points` inside a container of `size`.
///
/// Returns `None` when no center can be derived, i.e. for an empty point set.
#[must_use]
pub fn frame(points: &[GeoPoint], size: ViewportSize) -> Option<Viewport> {
    let center = compute_center(points)?;
    let zoom = compute_zoom(points, size.width_px, size.height_px);
    Some(Viewport { center, zoom })
}
