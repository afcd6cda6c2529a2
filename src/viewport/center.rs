//! Spherical centroid of a point set

use super::GeoPoint;

/// Center of `points` on the unit sphere.
///
/// Each point is projected to a 3D unit vector, the vectors are averaged and
/// the mean is converted back to latitude/longitude. Unlike averaging degrees
/// this behaves across the antimeridian and near the poles.
///
/// Returns `None` for an empty slice, or when the inputs are not finite.
#[must_use]
pub fn compute_center(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }

    let (x, y, z) = points.iter().fold((0.0, 0.0, 0.0), |(x, y, z), point| {
        let lat = point.latitude.to_radians();
        let lng = point.longitude.to_radians();
        (
            x + lat.cos() * lng.cos(),
            y + lat.cos() * lng.sin(),
            z + lat.sin(),
        )
    });

    let count = points.len() as f64;
    let (x, y, z) = (x / count, y / count, z / count);

    let hyp = x.hypot(y);
    let center = GeoPoint::new(z.atan2(hyp).to_degrees(), y.atan2(x).to_degrees());

    center.is_finite().then_some(center)
}
