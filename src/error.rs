use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while driving the suite.
///
/// Assertion failures are not errors: they are collected as
/// [`Failure`](crate::validation::Failure)s so a step can report every
/// broken check at once. Errors here abort the current step attempt.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication did not produce a usable token.
    #[error("setup failed: {0}")]
    Setup(String),

    /// The request never produced a response (connect, TLS, timeout).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Payload { url: String, message: String },

    /// The service answered with a status the step cannot work with.
    #[error("unexpected status {status} from {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read fixture {path}: {message}")]
    Fixture { path: String, message: String },

    #[error("failed to write report {path}: {message}")]
    Report { path: String, message: String },

    #[error("step timed out after {0} ms")]
    Timeout(u64),
}

pub type SuiteResult<T> = Result<T, SuiteError>;
