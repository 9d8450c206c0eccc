use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Environment, Profile, Validate};

/// Environment variable selecting the target environment
pub const ENVIRONMENT_SELECTOR: &str = "TEST_ENV";

/// Prefix of environment variables overriding configuration keys
pub const ENV_PREFIX: &str = "REQRES_SUITE";

/// Top-level suite configuration that aggregates all config sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Environment selector (Dev, Staging)
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Use the default environment instead of failing on an unknown selector
    #[serde(default)]
    pub fallback_to_default: bool,
    /// Replaces the base URL of the selected environment
    #[serde(default)]
    pub base_url: Option<String>,
    /// Extra headers, replacing profile headers with the same name
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub fixtures: FixtureConfig,
    #[serde(default)]
    pub checks: CheckConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Execution limits of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Time budget of a single step attempt in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// How many times a step that did not pass is attempted again
    #[serde(default = "default_retries")]
    pub retries: u32,
}

/// Login credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
}

/// Location of the expected user records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureConfig {
    #[serde(default = "default_fixture_path")]
    pub path: String,
}

/// Parameters of the assertions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Page requested by the listing step
    #[serde(default = "default_listing_page")]
    pub listing_page: u32,
    /// Suffix every listed email must contain
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
    /// User compared against the fixture
    #[serde(default = "default_known_user_id")]
    pub known_user_id: u64,
    /// Users that must not exist
    #[serde(default = "default_missing_user_ids")]
    pub missing_user_ids: Vec<u64>,
}

/// Report output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Write the JSON report to this path
    #[serde(default)]
    pub output: Option<String>,
}

fn default_environment() -> String {
    Environment::default().name().to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retries() -> u32 {
    1
}

fn default_email() -> String {
    "eve.holt@reqres.in".to_string()
}

fn default_password() -> String {
    "cityslicka".to_string()
}

fn default_fixture_path() -> String {
    "fixtures/users.json".to_string()
}

fn default_listing_page() -> u32 {
    2
}

fn default_email_domain() -> String {
    "@reqres.in".to_string()
}

fn default_known_user_id() -> u64 {
    2
}

fn default_missing_user_ids() -> Vec<u64> {
    vec![100, 99]
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            fallback_to_default: false,
            base_url: None,
            headers: BTreeMap::new(),
            run: RunConfig::default(),
            credentials: Credentials::default(),
            fixtures: FixtureConfig::default(),
            checks: CheckConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            retries: default_retries(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
        }
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            path: default_fixture_path(),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            listing_page: default_listing_page(),
            email_domain: default_email_domain(),
            known_user_id: default_known_user_id(),
            missing_user_ids: default_missing_user_ids(),
        }
    }
}

// Keep the password out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

impl RunConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl SuiteConfig {
    /// Resolve the connection profile this configuration targets
    pub fn profile(&self) -> Result<Profile, ConfigError> {
        let environment = Environment::resolve(&self.environment, self.fallback_to_default)?;
        let mut profile = environment.profile();

        if let Some(base_url) = &self.base_url {
            profile.base_url = base_url.clone();
        }

        for (name, value) in &self.headers {
            profile.set_header(name, value);
        }

        Ok(profile)
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ValidationError("run.timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.email.trim().is_empty() {
            return Err(ConfigError::ValidationError("credentials.email cannot be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::ValidationError("credentials.password cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for FixtureConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::ValidationError("fixtures.path cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Validate for CheckConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.listing_page == 0 {
            return Err(ConfigError::ValidationError("checks.listing_page must be > 0".to_string()));
        }
        if self.email_domain.trim().is_empty() {
            return Err(ConfigError::ValidationError("checks.email_domain cannot be empty".to_string()));
        }
        if self.missing_user_ids.contains(&self.known_user_id) {
            return Err(ConfigError::ValidationError(format!(
                "checks.missing_user_ids cannot contain the known user {}",
                self.known_user_id
            )));
        }
        Ok(())
    }
}

impl Validate for SuiteConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(ConfigError::ValidationError(format!(
                    "base_url must start with http:// or https://, got `{base_url}`"
                )));
            }
        }
        self.run.validate()?;
        self.credentials.validate()?;
        self.fixtures.validate()?;
        self.checks.validate()?;
        // Surfaces an unknown selector at load time rather than at first use
        self.profile()?;
        Ok(())
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. `TEST_ENV` selects the environment
/// 2. Environment variables: REQRES_SUITE__RUN__RETRIES=0
/// 3. config/local.toml (git-ignored, developer overrides)
/// 4. config/{environment}.toml (dev/staging)
/// 5. config/default.toml (base defaults)
pub fn load_config() -> Result<SuiteConfig, ConfigError> {
    use config::{Config, Environment as EnvSource, File};

    let selector = std::env::var(ENVIRONMENT_SELECTOR).ok();
    let file = selector
        .as_deref()
        .unwrap_or(Environment::default().name())
        .trim()
        .to_lowercase();

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", file)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(EnvSource::with_prefix(ENV_PREFIX).separator("__"))
        .set_override_option("environment", selector)?
        .build()?;

    let suite_config: SuiteConfig = config.try_deserialize()?;

    suite_config.validate()?;

    ::tracing::debug!(?suite_config, "configuration loaded");

    Ok(suite_config)
}
