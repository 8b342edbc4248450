//! Authenticated session core for the rentwatch client.
//!
//! Owns the bearer credential, derives authentication/subscription state
//! from it, attaches it to outgoing requests, recovers from credential
//! expiry with a single refresh-and-retry cycle, and gates navigation into
//! protected views.

pub mod api_client;
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
pub mod session;

#[cfg(test)]
mod tests;

/// Default backend origin, used when neither config file nor environment
/// override is present.
pub const DEFAULT_API_HOST: &str = "localhost:8000";
pub const DEFAULT_API_BASE_URL: &str = const_format::concatcp!("http://", DEFAULT_API_HOST);
