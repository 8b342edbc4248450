pub mod api_client;
pub mod config;
pub mod session;

pub use api_client::ApiError;
pub use config::ConfigError;
pub use session::{SessionError, SignupValidationFailure};

use common::ErrorLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] api_client::ApiError),

    #[error(transparent)]
    Session(#[from] session::SessionError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}
