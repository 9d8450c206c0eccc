use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Profile;
use crate::error::{SuiteError, SuiteResult};
use crate::validation::Failure;

/// Final state of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    /// Checks ran and some of them did not hold
    Failed { failures: Vec<Failure> },
    /// A precondition of the run (login) did not hold
    SetupFailed { message: String },
    /// The step could not be evaluated
    Errored { message: String },
    Skipped { reason: String },
}

impl Outcome {
    pub fn from_failures(failures: Vec<Failure>) -> Self {
        if failures.is_empty() {
            Outcome::Passed
        } else {
            Outcome::Failed { failures }
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "ok",
            Outcome::Failed { .. } => "FAILED",
            Outcome::SetupFailed { .. } => "SETUP FAILED",
            Outcome::Errored { .. } => "ERROR",
            Outcome::Skipped { .. } => "skipped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub name: String,
    pub outcome: Outcome,
    pub attempts: u32,
    pub elapsed_ms: u64,
}

impl StepReport {
    pub fn new(name: impl Into<String>, outcome: Outcome, attempts: u32, elapsed: Duration) -> Self {
        Self {
            name: name.into(),
            outcome,
            attempts,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    pub fn skipped(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(
            name,
            Outcome::Skipped {
                reason: reason.into(),
            },
            0,
            Duration::ZERO,
        )
    }
}

/// Pass/fail record of a whole run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub environment: String,
    pub base_url: String,
    pub steps: Vec<StepReport>,
}

impl Report {
    pub fn new(profile: &Profile) -> Self {
        Self {
            environment: profile.environment.to_string(),
            base_url: profile.base_url.clone(),
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.steps.iter().find(|step| step.name == name)
    }

    pub fn passed(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_passed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.steps.iter().filter(|step| step.outcome.is_skipped()).count()
    }

    pub fn not_passed(&self) -> usize {
        self.steps.len() - self.passed() - self.skipped()
    }

    /// Every step ran and passed
    pub fn is_success(&self) -> bool {
        self.passed() == self.steps.len()
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> SuiteResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        fs::write(path, json).map_err(|e| SuiteError::Report {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.environment, self.base_url)?;

        for step in &self.steps {
            match &step.outcome {
                Outcome::Skipped { reason } => {
                    writeln!(f, "  {:<12} {} ({})", step.outcome.label(), step.name, reason)?;
                }
                outcome => {
                    writeln!(
                        f,
                        "  {:<12} {} ({} attempt{}, {} ms)",
                        outcome.label(),
                        step.name,
                        step.attempts,
                        if step.attempts == 1 { "" } else { "s" },
                        step.elapsed_ms
                    )?;
                }
            }

            match &step.outcome {
                Outcome::Failed { failures } => {
                    for failure in failures {
                        writeln!(f, "      {failure}")?;
                    }
                }
                Outcome::SetupFailed { message } | Outcome::Errored { message } => {
                    writeln!(f, "      {message}")?;
                }
                _ => {}
            }
        }

        write!(
            f,
            "{} steps: {} passed, {} failed, {} skipped",
            self.steps.len(),
            self.passed(),
            self.not_passed(),
            self.skipped()
        )
    }
}
