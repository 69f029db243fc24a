//! Integration-test harness for the GoRest users API.
//!
//! This library provides the shared test-fixture lifecycle, the CRUD
//! lifecycle scenarios, and an in-process stand-in for the remote API so
//! the full scenario suite can run without live credentials.

pub mod fixture;
pub mod helpers;
pub mod mock_api;
pub mod scenarios;

// Re-export commonly used types for convenience
pub use fixture::TestContext;
pub use mock_api::MockUsersApi;
pub use scenarios::{Scenario, ScenarioResult, ScenarioRunner};
