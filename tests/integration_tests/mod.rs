//! Integration tests module
//!
//! End-to-end tests for the roomdesk client stack against a mock platform:
//! - Transport error handling and retry policy
//! - Background status polling and listener fan-out

pub mod error_scenarios;
pub mod fixtures;
pub mod poller_test;
