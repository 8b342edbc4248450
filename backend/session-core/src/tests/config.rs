// Unit tests for config loading, validation and env overrides
// Env-touching tests are serialized: the override variable is process-wide.

use crate::config::{API_URL_ENV, AppConfig};
use crate::error::ConfigError;

use std::env;

use serial_test::serial;

fn clear_override() {
    // SAFETY: tests mutating the environment run under #[serial].
    unsafe { env::remove_var(API_URL_ENV) };
}

#[test]
#[serial]
fn given_missing_config_file_when_loaded_then_defaults_apply() {
    clear_override();
    let dir = tempfile::tempdir().unwrap();

    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.api.base_url, crate::DEFAULT_API_BASE_URL);
    assert_eq!(config.api.timeout_secs, 30);
}

#[test]
#[serial]
fn given_env_override_when_loaded_then_base_url_is_replaced() {
    // SAFETY: serialized with every other env-touching test.
    unsafe { env::set_var(API_URL_ENV, "https://api.rentwatch.example") };

    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(dir.path()).unwrap();

    assert_eq!(config.api.base_url, "https://api.rentwatch.example");

    clear_override();
}

#[test]
#[serial]
fn given_saved_config_when_reloaded_then_values_round_trip() {
    clear_override();
    let dir = tempfile::tempdir().unwrap();

    let mut config = AppConfig::default();
    config.api.base_url = "https://api.rentwatch.example".to_string();
    config.api.timeout_secs = 10;
    config.save(dir.path()).unwrap();

    let reloaded = AppConfig::load(dir.path()).unwrap();
    assert_eq!(reloaded.api.base_url, "https://api.rentwatch.example");
    assert_eq!(reloaded.api.timeout_secs, 10);
}

#[test]
#[serial]
fn given_corrupt_config_file_when_loaded_then_parse_error_is_returned() {
    clear_override();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.json"), "{not json").unwrap();

    let result = AppConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_invalid_values_when_validated_then_each_is_rejected() {
    let mut config = AppConfig::default();
    config.api.base_url = "ftp://example.com".to_string();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));

    let mut config = AppConfig::default();
    config.api.base_url = String::new();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.api.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.api.timeout_secs = 301;
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.version = 0;
    assert!(config.validate().is_err());
}
