//! Zoom level estimation for square-tile Mercator maps

use std::f64::consts::{FRAC_PI_4, PI};

use super::GeoPoint;

/// Edge length of a map tile in pixels. Zoom 0 shows the world in one tile.
pub const TILE_SIZE: f64 = 256.0;
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 21;
/// Used when nothing is known about the points, and as the fallback for
/// degenerate input.
pub const DEFAULT_ZOOM: u8 = 10;
/// A single point has no spread to measure; show its neighbourhood.
pub const SINGLE_POINT_ZOOM: u8 = 15;

/// Keeps points off the viewport edge.
const EDGE_MARGIN: f64 = 0.5;

/// Latitude/longitude extent of a point set
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_lat: f64,
    max_lat: f64,
    min_lng: f64,
    max_lng: f64,
}

impl Bounds {
    /// Extent of `points`; every edge is NaN if any coordinate is not finite.
    fn of(points: &[GeoPoint]) -> Self {
        let mut bounds = Bounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lng: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
        };
        for point in points {
            if !point.is_finite() {
                return Bounds {
                    min_lat: f64::NAN,
                    max_lat: f64::NAN,
                    min_lng: f64::NAN,
                    max_lng: f64::NAN,
                };
            }
            bounds.min_lat = bounds.min_lat.min(point.latitude);
            bounds.max_lat = bounds.max_lat.max(point.latitude);
            bounds.min_lng = bounds.min_lng.min(point.longitude);
            bounds.max_lng = bounds.max_lng.max(point.longitude);
        }
        bounds
    }

    /// Longitude span in degrees, taking the shorter way around when the
    /// set straddles the antimeridian.
    fn lng_delta(&self) -> f64 {
        let mut delta = self.max_lng - self.min_lng;
        if delta < 0.0 {
            delta += 360.0;
        }
        if delta > 180.0 {
            delta = 360.0 - delta;
        }
        delta
    }

    /// Latitude span in projected Mercator units
    fn mercator_lat_delta(&self) -> f64 {
        (mercator_y(self.max_lat) - mercator_y(self.min_lat)).abs()
    }
}

fn mercator_y(latitude: f64) -> f64 {
    (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln()
}

/// Zoom at which `span` (in world units covering `world` per 256 px tile)
/// fills `pixels`. Zero span can zoom all the way in.
fn axis_zoom(pixels: f64, world: f64, span: f64) -> f64 {
    if span == 0.0 {
        f64::from(MAX_ZOOM)
    } else {
        (pixels * world / (TILE_SIZE * span)).log2()
    }
}

/// Integer zoom level in `[MIN_ZOOM, MAX_ZOOM]` that fits every point in a
/// `width_px` x `height_px` viewport.
///
/// No points gives [`DEFAULT_ZOOM`] and one point [`SINGLE_POINT_ZOOM`].
/// Anything that would produce a non-finite zoom (NaN coordinates, negative
/// dimensions) falls back to [`DEFAULT_ZOOM`]. Never panics.
#[must_use]
pub fn compute_zoom(points: &[GeoPoint], width_px: f64, height_px: f64) -> u8 {
    match points.len() {
        0 => return DEFAULT_ZOOM,
        1 => return SINGLE_POINT_ZOOM,
        _ => {}
    }

    let bounds = Bounds::of(points);
    let zoom_lng = axis_zoom(width_px, 360.0, bounds.lng_delta());
    let zoom_lat = axis_zoom(height_px, 2.0 * PI, bounds.mercator_lat_delta());

    let fit = if zoom_lng.is_nan() || zoom_lat.is_nan() {
        f64::NAN
    } else {
        zoom_lng.min(zoom_lat)
    };

    let zoom = (fit - EDGE_MARGIN)
        .clamp(f64::from(MIN_ZOOM), f64::from(MAX_ZOOM))
        .floor();

    if zoom.is_finite() {
        // Clamped to [2, 21] above.
        zoom as u8
    } else {
        DEFAULT_ZOOM
    }
}
