//! Sequencing of a run
//!
//! ```text
//! login ──ok──► list users ──► show user {known} ──► missing user {id} ...
//!   │
//!   └─failed──► every later step is skipped
//! ```
//!
//! Steps run strictly one after another. A step that does not pass is
//! attempted again up to `run.retries` times and every attempt is bounded by
//! `run.timeout_ms`.

use std::fmt;
use std::time::Instant;

use crate::client::ApiClient;
use crate::config::{Profile, SuiteConfig};
use crate::context::RunContext;
use crate::error::{SuiteError, SuiteResult};
use crate::fixture::Fixtures;
use crate::report::{Outcome, Report, StepReport};
use crate::steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Login,
    ListUsers,
    ShowUser(u64),
    MissingUser(u64),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Login => write!(f, "login"),
            Step::ListUsers => write!(f, "list users"),
            Step::ShowUser(id) => write!(f, "show user {id}"),
            Step::MissingUser(id) => write!(f, "missing user {id}"),
        }
    }
}

pub struct Suite {
    config: SuiteConfig,
    profile: Profile,
    client: ApiClient,
    fixtures: Fixtures,
}

impl Suite {
    pub fn new(config: SuiteConfig, fixtures: Fixtures) -> SuiteResult<Self> {
        let profile = config.profile()?;
        let client = ApiClient::new(&profile, config.run.timeout())?;

        Ok(Self {
            config,
            profile,
            client,
            fixtures,
        })
    }

    /// Build a suite reading the fixtures named by the configuration
    pub fn from_config(config: SuiteConfig) -> SuiteResult<Self> {
        let fixtures = Fixtures::load(&config.fixtures.path)?;

        Self::new(config, fixtures)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn steps(&self) -> Vec<Step> {
        let checks = &self.config.checks;
        let mut steps = vec![
            Step::Login,
            Step::ListUsers,
            Step::ShowUser(checks.known_user_id),
        ];

        steps.extend(checks.missing_user_ids.iter().copied().map(Step::MissingUser));
        steps
    }

    pub async fn run(&self) -> Report {
        let mut context = RunContext::new();
        let mut report = Report::new(&self.profile);

        ::tracing::info!(
            "Running tests in {} environment against {}",
            self.profile.environment,
            self.profile.base_url
        );

        for step in self.steps() {
            if step != Step::Login && !context.is_authenticated() {
                ::tracing::warn!(%step, "skipped, authentication did not succeed");
                report.push(StepReport::skipped(
                    step.to_string(),
                    "authentication did not succeed",
                ));
                continue;
            }

            report.push(self.run_step(step, &mut context).await);
        }

        ::tracing::info!(
            passed = report.passed(),
            failed = report.not_passed(),
            skipped = report.skipped(),
            "run finished"
        );

        report
    }

    async fn run_step(&self, step: Step, context: &mut RunContext) -> StepReport {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;

            let outcome = self.attempt(step, context).await;

            if outcome.is_passed() || attempts > self.config.run.retries {
                match &outcome {
                    Outcome::Passed => ::tracing::info!(%step, attempts, "passed"),
                    outcome => ::tracing::error!(%step, attempts, ?outcome, "did not pass"),
                }

                return StepReport::new(step.to_string(), outcome, attempts, start.elapsed());
            }

            ::tracing::warn!(%step, attempts, ?outcome, "did not pass, retrying");
        }
    }

    async fn attempt(&self, step: Step, context: &mut RunContext) -> Outcome {
        let timeout = self.config.run.timeout();
        let execution = async {
            match step {
                Step::Login => {
                    steps::login(&self.client, context, &self.config.credentials)
                        .await
                        .map(|()| Vec::new())
                }
                Step::ListUsers => {
                    steps::list_users(&self.client, context, &self.config.checks).await
                }
                Step::ShowUser(id) => {
                    steps::show_user(&self.client, context, &self.fixtures, id).await
                }
                Step::MissingUser(id) => steps::missing_user(&self.client, id).await,
            }
        };

        let result = match tokio::time::timeout(timeout, execution).await {
            Ok(result) => result,
            Err(_) => Err(SuiteError::Timeout(self.config.run.timeout_ms)),
        };

        match result {
            Ok(failures) => Outcome::from_failures(failures),
            Err(SuiteError::Setup(message)) => Outcome::SetupFailed { message },
            Err(e) if step == Step::Login => Outcome::SetupFailed {
                message: e.to_string(),
            },
            Err(e) => Outcome::Errored {
                message: e.to_string(),
            },
        }
    }
}
