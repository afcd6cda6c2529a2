//! Itinerary generation requests

use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::{build_client, check_response};
use crate::config::ApiConfig;
use crate::models::{GeneratedItinerary, Itinerary};
use crate::{Result, TripFrameError};

/// What the traveller asked for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Client chosen id of the generation, also the cache key
    pub uuid: String,
    pub what: String,
    #[serde(rename = "where")]
    pub where_: String,
    pub when: String,
    pub preferences: String,
}

impl GenerationRequest {
    /// Trimmed copy; rejects requests missing an id or destination
    pub fn normalized(&self) -> Result<Self> {
        let request = Self {
            uuid: self.uuid.trim().to_string(),
            what: self.what.trim().to_string(),
            where_: self.where_.trim().to_string(),
            when: self.when.trim().to_string(),
            preferences: self.preferences.trim().to_string(),
        };
        if request.uuid.is_empty() {
            return Err(TripFrameError::validation("generation id cannot be empty"));
        }
        if request.where_.is_empty() {
            return Err(TripFrameError::validation("destination cannot be empty"));
        }
        Ok(request)
    }

    /// Query string sent to `generate-itinerary`
    #[must_use]
    pub fn query_string(&self) -> String {
        [
            ("uuid", &self.uuid),
            ("what", &self.what),
            ("where", &self.where_),
            ("when", &self.when),
            ("what_preferred", &self.preferences),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Client for the service's `generate-itinerary` endpoint
pub struct ItineraryApiClient {
    client: ClientWithMiddleware,
    base_url: String,
    token: Option<String>,
}

impl ItineraryApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    #[must_use]
    pub fn generate_url(&self, request: &GenerationRequest) -> String {
        format!("{}/generate-itinerary?{}", self.base_url, request.query_string())
    }

    /// Generate (or fetch the already generated) itinerary for `request`
    #[instrument(skip(self, request), fields(uuid = %request.uuid))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedItinerary> {
        let request = request.normalized()?;
        let url = self.generate_url(&request);

        let mut call = self.client.get(&url);
        if let Some(token) = &self.token {
            call = call.bearer_auth(token);
        }

        let response = call
            .send()
            .await
            .map_err(|e| TripFrameError::api(format!("Itinerary request failed: {e}")))?;
        let response = check_response(response).await?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| TripFrameError::api(format!("Failed to parse itinerary response: {e}")))?;

        let generated = Itinerary::from_response(body)?;
        info!(
            cached = generated.cached,
            days = generated.itinerary.day_count(),
            "Itinerary received"
        );
        Ok(generated)
    }
}
