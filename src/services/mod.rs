//! Clients for the external itinerary service
//!
//! The service generates itineraries and searches hotels; this crate only
//! consumes it. Both clients share one HTTP stack: a reqwest client with the
//! configured timeout, wrapped in a retry middleware for transient failures,
//! and a bearer token on every request.

pub mod generation;
pub mod hotels;

use std::fmt;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::ApiConfig;
use crate::{Result, TripFrameError};

pub use generation::{GenerationRequest, ItineraryApiClient};
pub use hotels::{CachedHotelSearch, HotelApiClient, HotelSearch};

/// Error codes the itinerary service puts in failed responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceErrorCode {
    UserNotExist,
    ServerError,
    UserGenerationIdMismatch,
    ParametersIncomplete,
    RanOutOfCredits,
    /// Out of credits on the introductory plan
    NtlUserRanOutOfCredits,
    Unknown(String),
}

impl ServiceErrorCode {
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "USER_NOT_EXIST" => Self::UserNotExist,
            "SERVER_ERROR" => Self::ServerError,
            "USER_GENERATION_ID_MISMATCH" => Self::UserGenerationIdMismatch,
            "PARAMETERS_INCOMPLETE" => Self::ParametersIncomplete,
            "RAN_OUT_OF_CREDITS" => Self::RanOutOfCredits,
            "NTL_USR_RAN_OUT_OF_CREDITS" => Self::NtlUserRanOutOfCredits,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Pull the code out of an error response body: `{"error": CODE}`,
    /// `{"code": CODE}` or the bare code as text.
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ["error", "code"]
                .iter()
                .find_map(|field| value.get(*field).and_then(Value::as_str))
                .map_or_else(|| Self::Unknown(body.to_string()), Self::parse),
            Err(_) => Self::parse(body),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::UserNotExist => "USER_NOT_EXIST",
            Self::ServerError => "SERVER_ERROR",
            Self::UserGenerationIdMismatch => "USER_GENERATION_ID_MISMATCH",
            Self::ParametersIncomplete => "PARAMETERS_INCOMPLETE",
            Self::RanOutOfCredits => "RAN_OUT_OF_CREDITS",
            Self::NtlUserRanOutOfCredits => "NTL_USR_RAN_OUT_OF_CREDITS",
            Self::Unknown(code) => code,
        }
    }

    /// The request cannot be recovered; the user has to start over.
    #[must_use]
    pub fn requires_restart(&self) -> bool {
        matches!(
            self,
            Self::UserNotExist | Self::ServerError | Self::UserGenerationIdMismatch
        )
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UserNotExist | Self::UserGenerationIdMismatch => {
                "This itinerary does not belong to your account."
            }
            Self::ServerError => "The itinerary service failed. Please try again later.",
            Self::ParametersIncomplete => {
                "Please fill in where, when and what you would like to do."
            }
            Self::RanOutOfCredits | Self::NtlUserRanOutOfCredits => {
                "You have run out of itinerary credits."
            }
            Self::Unknown(_) => "The itinerary service returned an unexpected error.",
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared HTTP client with timeout and retry policy from `config`
pub(crate) fn build_client(config: &ApiConfig) -> Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(concat!("tripframe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| TripFrameError::config(format!("Failed to create HTTP client: {e}")))?;

    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

/// Turn a non-success response into the matching error
pub(crate) async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%status, "Itinerary service request failed");

    match status {
        StatusCode::UNAUTHORIZED => Err(TripFrameError::api(
            "Unauthorized. Please check the configured API token.",
        )),
        _ if body.trim().is_empty() => Err(TripFrameError::api(format!(
            "Request failed with status: {status}"
        ))),
        _ => Err(TripFrameError::Service {
            code: ServiceErrorCode::from_body(&body),
        }),
    }
}
