//! Shared primitives for the rentwatch client.
//!
//! This crate contains the small building blocks the session layer is made
//! of: error location tracking, HTTP status categorization and the redacted
//! access-token wrapper. No business logic lives here - just types that can
//! be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): shared primitives
//! - **session-core**: session state, HTTP client wrapper and route guard
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedAccessToken;
