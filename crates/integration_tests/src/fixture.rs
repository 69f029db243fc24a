//! Shared test-fixture lifecycle.
//!
//! Exactly one configured client exists per test run. The context is built
//! before any scenario executes and released once after the last one
//! finishes; scenarios borrow the client and never construct or dispose it
//! themselves.

use anyhow::{Context, Result};
use gorest_client::{create_client, ClientConfig, UserClient};
use tracing::{debug, info};

/// Owns the shared API client for one test run.
///
/// Construction is the setup boundary: configuration is loaded and the
/// authenticated client is built once. Dropping the context releases the
/// client; [`shutdown`](TestContext::shutdown) additionally records the
/// teardown and is safe to call more than once.
#[derive(Debug)]
pub struct TestContext {
    base_url: String,
    client: UserClient,
    shut_down: bool,
}

impl TestContext {
    /// Load configuration and build the shared client.
    ///
    /// Fails if configuration is missing or malformed; the caller is
    /// expected to abort the run before any scenario executes.
    pub fn initialize() -> Result<Self> {
        let config = ClientConfig::load().context(
            "Failed to load test configuration (set GOREST_BASE_URL and GOREST_API_TOKEN, \
             or provide config.json)",
        )?;
        Self::with_config(&config)
    }

    /// Build the shared client from an explicit configuration.
    ///
    /// Used by hermetic tests that point the harness at an in-process API.
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = create_client(config).context("Failed to build the shared HTTP client")?;
        info!(base_url = %config.base_url(), "Test fixture initialized");

        Ok(Self {
            base_url: config.base_url().to_string(),
            client,
            shut_down: false,
        })
    }

    /// The shared client, borrowed by scenarios.
    pub fn client(&self) -> &UserClient {
        &self.client
    }

    /// The base URL the run targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Record teardown.
    ///
    /// Idempotent, and tolerates a run where setup allocated nothing
    /// beyond the client itself. The client's resources are released when
    /// the context is dropped at the end of the run scope.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        debug!(base_url = %self.base_url, "Test fixture shut down");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
