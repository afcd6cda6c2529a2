//! HTTP routes for map framing
//!
//! Hosts call these whenever their point set or map container changes; each
//! request is answered by a fresh run of the pure framing functions.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get, routing::post};
use serde::{Deserialize, Serialize};

use crate::models::Itinerary;
use crate::viewport::{self, GeoPoint, ViewportSize};

/// Shared state of the HTTP routes
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Size used for edges the caller did not report
    pub fallback_size: ViewportSize,
}

impl AppState {
    #[must_use]
    pub fn size_for(&self, width: Option<f64>, height: Option<f64>) -> ViewportSize {
        ViewportSize::from_reported(width, height, self.fallback_size)
    }
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub points: Vec<GeoPoint>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ItineraryViewportRequest {
    pub itinerary: Itinerary,
    /// Zero based day; the whole trip when absent
    pub day: Option<usize>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewportResponse {
    /// `null` when there are no points to center on
    pub center: Option<GeoPoint>,
    pub zoom: u8,
    pub poi_count: usize,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/viewport", post(frame_points))
        .route("/itinerary/viewport", post(frame_itinerary))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

fn respond(points: &[GeoPoint], size: ViewportSize) -> ViewportResponse {
    ViewportResponse {
        center: viewport::compute_center(points),
        zoom: viewport::compute_zoom(points, size.width_px, size.height_px),
        poi_count: points.len(),
    }
}

async fn frame_points(
    State(state): State<AppState>,
    Json(request): Json<ViewportRequest>,
) -> ApiResult<ViewportResponse> {
    if let Some(bad) = request.points.iter().find(|p| !p.is_valid()) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("coordinates out of range: {}", bad.format_coordinates()),
        ));
    }
    let size = state.size_for(request.width, request.height);
    Ok(Json(respond(&request.points, size)))
}

async fn frame_itinerary(
    State(state): State<AppState>,
    Json(request): Json<ItineraryViewportRequest>,
) -> ApiResult<ViewportResponse> {
    let size = state.size_for(request.width, request.height);
    let points = match request.day {
        Some(day) if day >= request.itinerary.day_count() => {
            return Err((
                StatusCode::NOT_FOUND,
                format!(
                    "day {day} not found, itinerary has {} days",
                    request.itinerary.day_count()
                ),
            ));
        }
        Some(day) => request.itinerary.day_pois(day),
        None => request.itinerary.all_pois(),
    };
    Ok(Json(respond(&points, size)))
}
