//! CRUD lifecycle scenarios for the users resource.
//!
//! Each scenario is an independent, order-insensitive unit that drives one
//! lifecycle path through the shared client and asserts on the outcome:
//! create, read-after-create, update, delete-then-verify-gone, and listing
//! the collection. Scenarios that depend on a prior creation treat that
//! creation as a fail-fast setup step.

use anyhow::{bail, ensure, Context, Result};
use gorest_client::{Error, User, UserClient, UserUpdate};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::fixture::TestContext;
use crate::helpers::{test_user, unique_email};

/// Name applied by the update scenario.
pub const UPDATED_NAME: &str = "Updated Name";

/// The scenario set run by the harness.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scenario {
    /// Listing the collection returns a non-empty page of users.
    List,
    /// Creating a user echoes the submitted email and assigns an id.
    Create,
    /// A created user is readable by the id from the creation response.
    ReadAfterCreate,
    /// A partial rename is applied and visible on a follow-up read.
    Update,
    /// A deleted user is gone: the follow-up read sees 404.
    Delete,
}

impl Scenario {
    /// Every scenario, in reporting order.
    pub const ALL: [Scenario; 5] = [
        Scenario::List,
        Scenario::Create,
        Scenario::ReadAfterCreate,
        Scenario::Update,
        Scenario::Delete,
    ];

    /// Short name used for CLI selection and reporting.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::List => "list",
            Scenario::Create => "create",
            Scenario::ReadAfterCreate => "read-after-create",
            Scenario::Update => "update",
            Scenario::Delete => "delete",
        }
    }

    /// Resolve a scenario from its short name.
    pub fn from_name(name: &str) -> Option<Scenario> {
        Scenario::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Run this scenario against the shared client.
    pub async fn run(&self, client: &UserClient) -> Result<()> {
        match self {
            Scenario::List => list_users_returns_non_empty(client).await,
            Scenario::Create => create_user_echoes_email(client).await,
            Scenario::ReadAfterCreate => created_user_is_readable_by_id(client).await,
            Scenario::Update => patched_name_is_visible_on_read(client).await,
            Scenario::Delete => deleted_user_is_gone(client).await,
        }
    }
}

/// GET the collection and require a non-empty page of users.
pub async fn list_users_returns_non_empty(client: &UserClient) -> Result<()> {
    let users = client.list_users().await.context("Listing users failed")?;
    ensure!(
        !users.is_empty(),
        "Expected a non-empty user list, got 0 users"
    );
    info!(count = users.len(), "User list returned");
    Ok(())
}

/// POST a new user and require the email to be echoed back with an id.
pub async fn create_user_echoes_email(client: &UserClient) -> Result<()> {
    let payload = test_user(unique_email("test.user"));
    let created = client
        .create_user(&payload)
        .await
        .context("Creating a user failed")?;

    ensure!(
        created.email == payload.email,
        "Created email mismatch: expected {:?}, got {:?}",
        payload.email,
        created.email
    );
    ensure!(created.id > 0, "Created user carries no server-assigned id");
    Ok(())
}

/// Create a user, then GET it by the id from the creation response.
pub async fn created_user_is_readable_by_id(client: &UserClient) -> Result<()> {
    let created = create_fixture_user(client, "read.user").await?;

    let fetched = client
        .get_user(created.id)
        .await
        .context("Reading the created user back failed")?;
    ensure!(
        fetched.id == created.id,
        "Read-back id mismatch: expected {}, got {}",
        created.id,
        fetched.id
    );
    Ok(())
}

/// Create a user, PATCH its name, and require the rename to be visible on
/// a follow-up read with the id unchanged.
pub async fn patched_name_is_visible_on_read(client: &UserClient) -> Result<()> {
    let created = create_fixture_user(client, "update.user").await?;

    client
        .update_user(created.id, &UserUpdate::rename(UPDATED_NAME))
        .await
        .context("Patching the user failed")?;

    let fetched = client
        .get_user(created.id)
        .await
        .context("Reading the patched user back failed")?;
    ensure!(
        fetched.name == UPDATED_NAME,
        "Name after patch: expected {:?}, got {:?}",
        UPDATED_NAME,
        fetched.name
    );
    ensure!(
        fetched.id == created.id,
        "Id changed across the patch: expected {}, got {}",
        created.id,
        fetched.id
    );
    Ok(())
}

/// Create a user, DELETE it, and require the follow-up read to see 404.
pub async fn deleted_user_is_gone(client: &UserClient) -> Result<()> {
    let created = create_fixture_user(client, "delete.user").await?;

    client
        .delete_user(created.id)
        .await
        .context("Deleting the user failed")?;

    match client.get_user(created.id).await {
        Err(Error::NotFound) => Ok(()),
        Ok(user) => bail!("Deleted user {} is still readable: {:?}", created.id, user),
        Err(other) => {
            Err(other).context("Read after delete failed for an unexpected reason")
        }
    }
}

/// Creation used as a setup step by the dependent scenarios; its failure
/// aborts the scenario immediately.
async fn create_fixture_user(client: &UserClient, prefix: &str) -> Result<User> {
    let payload = test_user(unique_email(prefix));
    client
        .create_user(&payload)
        .await
        .context("Scenario setup: user creation failed")
}

/// Result of running a single scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub success: bool,
    pub error: Option<String>,
    pub duration: Duration,
}

/// Drives the scenario set through the shared fixture.
pub struct ScenarioRunner<'a> {
    ctx: &'a TestContext,
}

impl<'a> ScenarioRunner<'a> {
    pub fn new(ctx: &'a TestContext) -> Self {
        Self { ctx }
    }

    /// Run every scenario, in order.
    pub async fn run_all(&self) -> Vec<ScenarioResult> {
        self.run(&Scenario::ALL).await
    }

    /// Run the given scenarios sequentially, collecting per-scenario
    /// results. A failure never stops the remaining scenarios.
    pub async fn run(&self, scenarios: &[Scenario]) -> Vec<ScenarioResult> {
        let mut results = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            results.push(self.run_single(*scenario).await);
        }

        let passed = results.iter().filter(|r| r.success).count();
        info!(
            total = results.len(),
            passed,
            failed = results.len() - passed,
            "Scenario suite completed"
        );
        results
    }

    /// Run a single scenario against the shared client.
    pub async fn run_single(&self, scenario: Scenario) -> ScenarioResult {
        info!(scenario = scenario.name(), "Running scenario");
        let start = Instant::now();
        let outcome = scenario.run(self.ctx.client()).await;
        let duration = start.elapsed();

        match outcome {
            Ok(()) => {
                info!(
                    scenario = scenario.name(),
                    duration_ms = duration.as_millis() as u64,
                    "Scenario passed"
                );
                ScenarioResult {
                    scenario,
                    success: true,
                    error: None,
                    duration,
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                error!(
                    scenario = scenario.name(),
                    error = message.as_str(),
                    "Scenario failed"
                );
                ScenarioResult {
                    scenario,
                    success: false,
                    error: Some(message),
                    duration,
                }
            }
        }
    }
}
