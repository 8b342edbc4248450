//! Error types for the HTTP client wrapper.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - credential expiry gets its own variant so callers can tell a dead
//!   session from an ordinary failed request
//! - all errors include ErrorLocation for debugging, captured via
//!   `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server rejected request: HTTP {status_code} - {detail} {location}")]
    Status {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Session expired: credential refresh was rejected {location}")]
    SessionExpired { location: ErrorLocation },
}

impl ApiError {
    #[track_caller]
    pub fn session_expired() -> Self {
        ApiError::SessionExpired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from an HTTP response with explicit status code.
    #[track_caller]
    pub fn from_http_response(status_code: u16, detail: impl Into<String>) -> Self {
        ApiError::Status {
            status_code: HttpStatusCode(status_code),
            detail: detail.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Get the HTTP status code if applicable.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ApiError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Error category for log labels.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::Http { .. } => "http",
            ApiError::Json { .. } => "json",
            ApiError::UrlParse { .. } => "url_parse",
            ApiError::Status { status_code, .. } if status_code.is_server_error() => {
                "server_error"
            }
            ApiError::Status { .. } => "client_error",
            ApiError::SessionExpired { .. } => "session_expired",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ApiError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
