#![deny(warnings)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod fixture;
pub mod report;
pub mod requests;
pub mod responses;
pub mod runner;
pub mod steps;
pub mod telemetry;
pub mod validation;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use client::{ApiClient, ApiResponse};
pub use config::{Environment, Profile, SuiteConfig};
pub use context::RunContext;
pub use error::{SuiteError, SuiteResult};
pub use fixture::Fixtures;
pub use report::{Outcome, Report, StepReport};
pub use runner::{Step, Suite};
