pub mod app;
pub mod environment;

use thiserror::Error;

pub use app::{
    CheckConfig, Credentials, FixtureConfig, ReportConfig, RunConfig, SuiteConfig, load_config,
};
pub use environment::{Environment, Profile};

/// Errors produced while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    ValidationError(String),

    #[error("unknown environment `{selector}`, expected one of: {expected}")]
    UnknownEnvironment { selector: String, expected: String },
}

/// Configuration sections check their own invariants after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the suite configuration from files and environment variables
pub fn load() -> Result<SuiteConfig, ConfigError> {
    app::load_config()
}
