//! Hotel search around an itinerary

use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::{build_client, check_response};
use crate::cache::{self, ResultCache};
use crate::config::{ApiConfig, CacheConfig};
use crate::models::{self, Hotel};
use crate::viewport::GeoPoint;
use crate::{Result, TripFrameError};

/// Anything that can list hotels around a point
#[async_trait]
pub trait HotelSearch: Send + Sync {
    async fn search_near(&self, center: GeoPoint) -> Result<Vec<Hotel>>;
}

#[derive(Debug, Deserialize)]
struct HotelsResponse {
    #[serde(default)]
    hotels: Vec<Hotel>,
}

/// Client for the service's `get-place-hotels` endpoint
pub struct HotelApiClient {
    client: ClientWithMiddleware,
    base_url: String,
    token: Option<String>,
}

impl HotelApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Request URL for hotels near `center`
    #[must_use]
    pub fn search_url(&self, center: GeoPoint) -> String {
        format!(
            "{}/get-place-hotels?lat={}&lng={}",
            self.base_url, center.latitude, center.longitude
        )
    }
}

#[async_trait]
impl HotelSearch for HotelApiClient {
    #[instrument(skip(self), fields(lat = center.latitude, lng = center.longitude))]
    async fn search_near(&self, center: GeoPoint) -> Result<Vec<Hotel>> {
        let url = self.search_url(center);
        debug!("Hotel search request URL: {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TripFrameError::api(format!("Hotel search request failed: {e}")))?;
        let response = check_response(response).await?;

        let body: HotelsResponse = response
            .json()
            .await
            .map_err(|e| TripFrameError::api(format!("Failed to parse hotel response: {e}")))?;

        info!(count = body.hotels.len(), "Hotels found");
        Ok(body.hotels)
    }
}

/// Wraps a [`HotelSearch`] with the persistent result cache.
///
/// Results are keyed by itinerary id when one is known, otherwise by the
/// rounded search center.
pub struct CachedHotelSearch<S> {
    inner: S,
    cache: ResultCache,
    ttl: Duration,
}

impl<S: HotelSearch> CachedHotelSearch<S> {
    pub fn new(inner: S, cache: ResultCache, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache,
            ttl: Duration::from_secs(u64::from(config.ttl_minutes) * 60),
        }
    }

    /// Hotels near `center`, cheapest first, served from cache while fresh
    #[instrument(skip(self), fields(lat = center.latitude, lng = center.longitude))]
    pub async fn search_for(
        &self,
        itinerary_id: Option<&str>,
        center: GeoPoint,
    ) -> Result<Vec<Hotel>> {
        let key = cache::hotels_key(itinerary_id, center);

        // Hotels are stored as JSON text: postcard cannot decode the
        // untagged price field.
        match self.cache.get::<String>(&key).await {
            Ok(Some(json)) => {
                debug!(%key, "Hotel cache hit");
                return Ok(serde_json::from_str(&json)?);
            }
            Ok(None) => debug!(%key, "Hotel cache miss"),
            Err(e) => warn!(%key, "Hotel cache read failed: {e}"),
        }

        let mut hotels = self.inner.search_near(center).await?;
        models::sort_by_price(&mut hotels);

        let json = serde_json::to_string(&hotels)?;
        if let Err(e) = self.cache.put(&key, json, cache::jittered(self.ttl)).await {
            warn!(%key, "Hotel cache write failed: {e}");
        }
        Ok(hotels)
    }
}

#[async_trait]
impl<S: HotelSearch> HotelSearch for CachedHotelSearch<S> {
    async fn search_near(&self, center: GeoPoint) -> Result<Vec<Hotel>> {
        self.search_for(None, center).await
    }
}
