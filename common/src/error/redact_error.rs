//! Error raised when redacted material is about to leave the process.

use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised by the serialization guard on [`crate::RedactedAccessToken`]:
/// the credential must be attached explicitly, never serialized as part of
/// a larger structure.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
