//! Error types and handling for `tripframe`
//!
//! The viewport framer itself never fails; these errors cover the edges of
//! the crate: configuration, the external itinerary and hotel services, the
//! persistent cache and user supplied input.

use thiserror::Error;

use crate::services::ServiceErrorCode;

/// Main error type for the `tripframe` crate
#[derive(Error, Debug)]
pub enum TripFrameError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport level failures talking to an external service
    #[error("API error: {message}")]
    Api { message: String },

    /// The itinerary service answered with one of its error codes
    #[error("Service error: {code}")]
    Service { code: ServiceErrorCode },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Malformed JSON documents
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl TripFrameError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripFrameError::Config { .. } => {
                "Configuration error. Please check your config file and API token.".to_string()
            }
            TripFrameError::Api { .. } => {
                "Unable to reach the itinerary service. Please check your internet connection."
                    .to_string()
            }
            TripFrameError::Service { code } => code.user_message().to_string(),
            TripFrameError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripFrameError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TripFrameError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TripFrameError::Json { .. } => {
                "The itinerary document could not be parsed.".to_string()
            }
        }
    }
}
