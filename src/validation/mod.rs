//! Assertions over response data
//!
//! Checks never stop at the first problem: every violated expectation is
//! recorded as a [`Failure`] naming the check and the offending value, so a
//! single run reports everything that is wrong with a response.

pub mod listing;
pub mod not_found;
pub mod record;

use std::fmt;

use serde::{Deserialize, Serialize};

/// One violated expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub check: String,
    pub detail: String,
}

impl Failure {
    pub fn new(check: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.detail)
    }
}

/// Accumulates failures of a step
#[derive(Debug, Default)]
pub struct Checks {
    failures: Vec<Failure>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure unless `condition` holds
    pub fn expect(
        &mut self,
        condition: bool,
        check: impl Into<String>,
        detail: impl FnOnce() -> String,
    ) -> bool {
        if !condition {
            self.failures.push(Failure::new(check, detail()));
        }
        condition
    }

    /// Record a failure unless `expected == actual`
    pub fn equal<T: PartialEq + fmt::Debug>(
        &mut self,
        check: impl Into<String>,
        expected: &T,
        actual: &T,
    ) -> bool {
        self.expect(expected == actual, check, || {
            format!("expected {expected:?}, got {actual:?}")
        })
    }

    pub fn extend(&mut self, failures: impl IntoIterator<Item = Failure>) {
        self.failures.extend(failures);
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }
}
