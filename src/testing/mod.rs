//! Helpers for exercising the suite without reaching the public service

pub mod server;
pub mod setup;

pub use server::{StubServer, StubState};
