//! Stateful wrapper that re-frames the map when its inputs change

use tracing::debug;

use super::{GeoPoint, Viewport, ViewportSize, frame};

/// Tracks the current point set and container size of one map and hands out
/// a new [`Viewport`] whenever either changes.
#[derive(Debug, Clone, Default)]
pub struct MapCamera {
    points: Vec<GeoPoint>,
    size: ViewportSize,
    current: Option<Viewport>,
}

impl MapCamera {
    #[must_use]
    pub fn new(size: ViewportSize) -> Self {
        Self {
            points: Vec::new(),
            size,
            current: None,
        }
    }

    /// The viewport for the latest inputs, `None` while there are no points
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.current
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    /// Replace the framed points. Returns the new viewport if the map moved
    /// to a new framing.
    pub fn update_points(&mut self, points: &[GeoPoint]) -> Option<Viewport> {
        if self.points == points {
            return None;
        }
        self.points = points.to_vec();
        self.reframe()
    }

    /// Container was resized. Returns the new viewport if the map moved to a
    /// new framing.
    pub fn resize(&mut self, size: ViewportSize) -> Option<Viewport> {
        if self.size == size {
            return None;
        }
        self.size = size;
        self.reframe()
    }

    fn reframe(&mut self) -> Option<Viewport> {
        let next = frame(&self.points, self.size);
        if next == self.current {
            return None;
        }
        debug!(
            points = self.points.len(),
            width = self.size.width_px,
            height = self.size.height_px,
            zoom = ?next.map(|v| v.zoom),
            "Map camera reframed"
        );
        self.current = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day_points() -> Vec<GeoPoint> {
        vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]
    }

    #[test]
    fn test_new_camera_has_no_viewport() {
        let camera = MapCamera::new(ViewportSize::new(1000.0, 1000.0));
        assert_eq!(camera.viewport(), None);
    }

    #[test]
    fn test_update_points_frames_map() {
        let mut camera = MapCamera::new(ViewportSize::new(1000.0, 1000.0));
        let viewport = camera.update_points(&day_points()).unwrap();
        assert_eq!(viewport.zoom, 9);
        assert_eq!(camera.viewport(), Some(viewport));
    }

    #[test]
    fn test_unchanged_inputs_do_not_reframe() {
        let mut camera = MapCamera::new(ViewportSize::new(1000.0, 1000.0));
        camera.update_points(&day_points());
        assert_eq!(camera.update_points(&day_points()), None);
        assert_eq!(camera.resize(ViewportSize::new(1000.0, 1000.0)), None);
    }

    #[test]
    fn test_resize_recomputes_zoom() {
        let mut camera = MapCamera::new(ViewportSize::new(1000.0, 1000.0));
        camera.update_points(&day_points());
        let viewport = camera.resize(ViewportSize::new(2000.0, 1000.0)).unwrap();
        assert_eq!(viewport.zoom, 10);
        assert_eq!(camera.size(), ViewportSize::new(2000.0, 1000.0));
    }

    #[test]
    fn test_clearing_points_clears_viewport() {
        let mut camera = MapCamera::new(ViewportSize::new(1000.0, 1000.0));
        camera.update_points(&day_points());
        assert_eq!(camera.update_points(&[]), None);
        assert_eq!(camera.viewport(), None);
    }
}
