//! Error types for session operations.

use crate::error::ApiError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Errors surfaced by the session service.
///
/// Transient failures and backend rejections are distinct variants so the
/// UI can render them differently; nothing here is swallowed silently.
#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Invalid email or password {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Signup validation failed: {reason} {location}")]
    Validation {
        reason: SignupValidationFailure,
        location: ErrorLocation,
    },

    #[error("Request rejected: HTTP {status_code} - {detail} {location}")]
    Rejected {
        status_code: HttpStatusCode,
        detail: String,
        location: ErrorLocation,
    },

    #[error("Profile fetch failed, session cleared: {message} {location}")]
    ProfileUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Specific reasons for signup prevalidation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupValidationFailure {
    EmptyEmail,
    InvalidEmail,
    PasswordTooShort { min: usize, actual: usize },
    PasswordTooLong { max: usize, actual: usize },
    ConsentRequired,
}

impl std::fmt::Display for SignupValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is empty"),
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::PasswordTooShort { min, actual } => {
                write!(f, "password too short ({} chars, minimum {})", actual, min)
            }
            Self::PasswordTooLong { max, actual } => {
                write!(f, "password too long ({} chars, maximum {})", actual, max)
            }
            Self::ConsentRequired => write!(f, "GDPR consent is required to register"),
        }
    }
}

impl SessionError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        SessionError::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(reason: SignupValidationFailure) -> Self {
        SessionError::Validation {
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn profile_unavailable(message: impl Into<String>) -> Self {
        SessionError::ProfileUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert a client-wrapper failure into the variant the UI should see:
    /// backend rejections keep their status and detail, everything else
    /// passes through.
    #[track_caller]
    pub fn from_rejection(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                status_code,
                detail,
                ..
            } => SessionError::Rejected {
                status_code,
                detail,
                location: ErrorLocation::from(Location::caller()),
            },
            other => SessionError::Api(other),
        }
    }

    /// Error category for log labels.
    pub fn error_category(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials { .. } => "invalid_credentials",
            SessionError::Validation { .. } => "validation",
            SessionError::Rejected { .. } => "rejected",
            SessionError::ProfileUnavailable { .. } => "profile_unavailable",
            SessionError::Api(inner) => inner.error_category(),
        }
    }
}
