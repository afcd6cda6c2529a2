//! Behavioural properties of viewport framing through the public API

use tripframe::viewport::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, SINGLE_POINT_ZOOM};
use tripframe::{GeoPoint, Itinerary, MapCamera, ViewportSize, compute_center, compute_zoom, frame};

const EPS: f64 = 1e-9;

/// Small deterministic generator so the sweeps below are reproducible
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn point(&mut self) -> GeoPoint {
        GeoPoint::new(
            self.next_unit() * 170.0 - 85.0,
            self.next_unit() * 360.0 - 180.0,
        )
    }
}

#[test]
fn test_single_point_always_zoom_15() {
    let mut rng = Lcg(7);
    for _ in 0..200 {
        let point = rng.point();
        let width = 1.0 + rng.next_unit() * 4000.0;
        let height = 1.0 + rng.next_unit() * 4000.0;
        assert_eq!(compute_zoom(&[point], width, height), SINGLE_POINT_ZOOM);
    }
}

#[test]
fn test_empty_always_zoom_10() {
    for (w, h) in [(1.0, 1.0), (300.0, 300.0), (1920.0, 1080.0)] {
        assert_eq!(compute_zoom(&[], w, h), DEFAULT_ZOOM);
    }
}

#[test]
fn test_zoom_in_range_for_random_sets() {
    let mut rng = Lcg(42);
    for _ in 0..500 {
        let count = 2 + (rng.next_unit() * 8.0) as usize;
        let points: Vec<GeoPoint> = (0..count).map(|_| rng.point()).collect();
        let width = 1.0 + rng.next_unit() * 4000.0;
        let height = 1.0 + rng.next_unit() * 4000.0;
        let zoom = compute_zoom(&points, width, height);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&zoom), "zoom {zoom} for {points:?}");
    }
}

#[test]
fn test_center_ignores_order() {
    let mut rng = Lcg(99);
    for _ in 0..50 {
        let mut points: Vec<GeoPoint> = (0..6).map(|_| rng.point()).collect();
        let Some(before) = compute_center(&points) else {
            continue;
        };
        points.reverse();
        points.swap(0, 3);
        let after = compute_center(&points).unwrap();
        assert!((before.latitude - after.latitude).abs() < 1e-7);
        // Longitude wraps at the antimeridian.
        let dlng = (before.longitude - after.longitude).abs();
        assert!(dlng < 1e-7 || (dlng - 360.0).abs() < 1e-7);
    }
}

#[test]
fn test_center_of_single_point() {
    let mut rng = Lcg(3);
    for _ in 0..100 {
        let point = rng.point();
        let center = compute_center(&[point]).unwrap();
        assert!((center.latitude - point.latitude).abs() < EPS);
        assert!((center.longitude - point.longitude).abs() < EPS);
    }
}

#[test]
fn test_antimeridian_span_is_narrow() {
    let crossing = [GeoPoint::new(20.0, 179.0), GeoPoint::new(20.0, -179.0)];
    let narrow = [GeoPoint::new(20.0, 0.0), GeoPoint::new(20.0, 2.0)];
    assert_eq!(
        compute_zoom(&crossing, 1000.0, 1000.0),
        compute_zoom(&narrow, 1000.0, 1000.0)
    );
    assert!(compute_zoom(&crossing, 1000.0, 1000.0) > MIN_ZOOM);
}

#[test]
fn test_more_width_never_zooms_out() {
    let points = [GeoPoint::new(45.0, 7.0), GeoPoint::new(45.0, 8.0)];
    let mut width = 100.0;
    let mut last = compute_zoom(&points, width, 800.0);
    for _ in 0..8 {
        width *= 2.0;
        let zoom = compute_zoom(&points, width, 800.0);
        assert!(zoom >= last);
        last = zoom;
    }
}

#[test]
fn test_reference_scenario() {
    let points = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0)];
    assert_eq!(compute_zoom(&points, 1000.0, 1000.0), 6);
}

#[test]
fn test_nan_never_escapes() {
    let points = [GeoPoint::new(f64::NAN, 10.0), GeoPoint::new(0.0, 0.0)];
    assert_eq!(compute_zoom(&points, 1000.0, 1000.0), DEFAULT_ZOOM);
    assert_eq!(compute_center(&points), None);
    assert_eq!(frame(&points, ViewportSize::new(1000.0, 1000.0)), None);
}

#[test]
fn test_itinerary_day_switching_with_camera() {
    let itinerary: Itinerary = serde_json::from_str(include_str!("data/kyoto.json")).unwrap();
    let mut camera = MapCamera::new(ViewportSize::observed(200.0, 900.0));

    let day_one = camera.update_points(&itinerary.day_pois(0)).unwrap();
    let day_two = camera.update_points(&itinerary.day_pois(1)).unwrap();
    assert_ne!(day_one.center, day_two.center);
    assert_eq!(camera.viewport(), Some(day_two));

    // Arashiyama sits well west of the day one sights.
    assert!(day_two.center.longitude < day_one.center.longitude);

    let resized = camera.resize(ViewportSize::observed(1600.0, 900.0));
    if let Some(resized) = resized {
        assert!(resized.zoom >= day_two.zoom);
    }

    let hotels_center = itinerary.trip_center().unwrap();
    assert!((34.9..35.1).contains(&hotels_center.latitude));
}
