//! Configuration loading from files and environment variables
//!
//! These tests mutate process environment variables and therefore run
//! serially.

use reqres_suite::config::*;
use serial_test::serial;
use std::env;

mod utils {
    /// Clean up environment variables read by the loader
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("REQRES_SUITE") || k == "TEST_ENV")
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }
    }
}

#[test]
#[serial]
fn test_load_default_config_success() {
    utils::clean_env_vars();

    let config = load();
    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());

    let config = config.unwrap();
    assert_eq!(config.environment, "Dev");
    assert!(!config.fallback_to_default);
    assert_eq!(config.run.timeout_ms, 30_000);
    assert_eq!(config.run.retries, 1);
    assert_eq!(config.credentials.email, "eve.holt@reqres.in");
    assert_eq!(config.fixtures.path, "fixtures/users.json");
    assert_eq!(config.checks.listing_page, 2);
    assert_eq!(config.checks.missing_user_ids, vec![100, 99]);

    let profile = config.profile().unwrap();
    assert_eq!(profile.environment, Environment::Dev);
    assert_eq!(profile.base_url, "https://reqres.in");
    assert_eq!(profile.header("x-api-key"), Some("reqres-free-v1"));

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_selector_picks_environment_and_its_file() {
    utils::clean_env_vars();
    unsafe { env::set_var("TEST_ENV", "staging") };

    let config = load().unwrap();
    let profile = config.profile().unwrap();

    assert_eq!(profile.environment, Environment::Staging);
    assert_eq!(profile.base_url, "https://staging.reqres.in");
    assert_eq!(profile.header("x-api-key"), Some("reqres-staging-v1"));
    // From config/staging.toml
    assert_eq!(config.run.timeout_ms, 60_000);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_unknown_selector_is_an_error() {
    utils::clean_env_vars();
    unsafe { env::set_var("TEST_ENV", "Production") };

    let result = load();

    match result {
        Err(ConfigError::UnknownEnvironment { selector, .. }) => {
            assert_eq!(selector, "Production")
        }
        other => panic!("expected unknown environment, got {other:?}"),
    }

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_unknown_selector_falls_back_when_enabled() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("TEST_ENV", "Production");
        env::set_var("REQRES_SUITE__FALLBACK_TO_DEFAULT", "true");
    }

    let config = load().unwrap();

    assert!(config.fallback_to_default);
    assert_eq!(config.profile().unwrap().environment, Environment::Dev);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_environment_variable_override() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("REQRES_SUITE__RUN__RETRIES", "0");
        env::set_var("REQRES_SUITE__BASE_URL", "http://127.0.0.1:9999");
        env::set_var("REQRES_SUITE__CREDENTIALS__PASSWORD", "secret");
    }

    let config = load().unwrap();

    assert_eq!(config.run.retries, 0, "Retries should be overridden by env var");
    assert_eq!(config.credentials.password, "secret");
    assert_eq!(config.profile().unwrap().base_url, "http://127.0.0.1:9999");

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_invalid_override_fails_validation() {
    utils::clean_env_vars();
    unsafe { env::set_var("REQRES_SUITE__RUN__TIMEOUT_MS", "0") };

    let result = load();

    assert!(
        matches!(result, Err(ConfigError::ValidationError(ref message)) if message.contains("timeout_ms")),
        "{result:?}"
    );

    utils::clean_env_vars();
}
