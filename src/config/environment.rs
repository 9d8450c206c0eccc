use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Named target environments the suite knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    Dev,
    Staging,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Dev, Environment::Staging];

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Dev => "Dev",
            Environment::Staging => "Staging",
        }
    }

    /// Resolve a selector string.
    ///
    /// Matching is case-insensitive. An unknown selector is an error unless
    /// `fallback` is set, in which case the default environment is used and
    /// a warning is logged.
    pub fn resolve(selector: &str, fallback: bool) -> Result<Self, ConfigError> {
        match selector.parse::<Environment>() {
            Ok(environment) => Ok(environment),
            Err(e) if fallback => {
                ::tracing::warn!(
                    selector,
                    "{}; falling back to {}",
                    e,
                    Environment::default()
                );

                Ok(Environment::default())
            }
            Err(e) => Err(e),
        }
    }

    fn base_url(&self) -> &'static str {
        match self {
            Environment::Dev => "https://reqres.in",
            Environment::Staging => "https://staging.reqres.in",
        }
    }

    fn api_key(&self) -> &'static str {
        match self {
            Environment::Dev => "reqres-free-v1",
            Environment::Staging => "reqres-staging-v1",
        }
    }

    /// Built-in connection profile of this environment
    pub fn profile(&self) -> Profile {
        Profile {
            environment: *self,
            base_url: self.base_url().to_string(),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
                ("x-api-key".to_string(), self.api_key().to_string()),
            ],
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim();

        Environment::ALL
            .into_iter()
            .find(|environment| environment.name().eq_ignore_ascii_case(selector))
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                selector: s.to_string(),
                expected: Environment::ALL
                    .iter()
                    .map(Environment::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Base URL and default headers every request of a run is sent with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub environment: Environment,
    pub base_url: String,
    pub headers: Vec<(String, String)>,
}

impl Profile {
    /// Replace the header with the same (case-insensitive) name, or append it
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
