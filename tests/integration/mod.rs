//! Integration tests for reqres-suite
//!
//! These tests drive the suite over real HTTP, either against the in-process
//! stub service or against scripted mockito responses.

pub mod login_test;
pub mod suite_flow;
