//! Pixel size of the map container

use serde::{Deserialize, Serialize};

/// Smallest container edge the map is framed for
pub const MIN_CONTAINER_PX: f64 = 300.0;
/// Window size assumed when the host cannot report one
pub const DEFAULT_WINDOW_WIDTH: f64 = 1200.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 800.0;

/// Width and height of the map area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width_px: f64,
    pub height_px: f64,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// Size reported by a resize observation. Each edge is raised to at
    /// least [`MIN_CONTAINER_PX`] so a collapsed container does not force the
    /// map all the way out.
    #[must_use]
    pub fn observed(width_px: f64, height_px: f64) -> Self {
        Self::new(
            width_px.max(MIN_CONTAINER_PX),
            height_px.max(MIN_CONTAINER_PX),
        )
    }

    /// Size to use before the container has been laid out: the map takes
    /// half the window width and the full window height.
    #[must_use]
    pub fn fallback(window_width: f64, window_height: f64) -> Self {
        Self::new(
            (window_width / 2.0).floor().max(MIN_CONTAINER_PX),
            window_height,
        )
    }

    /// [`ViewportSize::fallback`] for the assumed default window
    #[must_use]
    pub fn default_window() -> Self {
        Self::fallback(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT)
    }

    /// Size from container edges a host reported, each possibly missing.
    /// Reported edges get the [`ViewportSize::observed`] minimum; missing or
    /// zero edges ("not laid out yet") come from `fallback`.
    #[must_use]
    pub fn from_reported(width: Option<f64>, height: Option<f64>, fallback: Self) -> Self {
        let edge = |reported: Option<f64>, fallback: f64| {
            reported
                .filter(|px| *px > 0.0)
                .map_or(fallback, |px| px.max(MIN_CONTAINER_PX))
        };
        Self::new(
            edge(width, fallback.width_px),
            edge(height, fallback.height_px),
        )
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::default_window()
    }
}
