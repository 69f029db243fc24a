//! Live scenarios against the real GoRest users API.
//!
//! These tests exercise the remote service end to end. They require:
//! - `GOREST_BASE_URL` and `GOREST_API_TOKEN` set in the environment, or a
//!   `config.json` next to the test binary
//! - Network access to the remote API
//!
//! Run with: cargo test -p integration_tests --test live_api -- --ignored

use integration_tests::scenarios;
use integration_tests::{ScenarioRunner, TestContext};

fn live_context() -> TestContext {
    TestContext::initialize()
        .expect("Live tests need GOREST_BASE_URL and GOREST_API_TOKEN, or config.json")
}

/// Listing the collection returns at least one user.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_list_users_returns_non_empty() {
    let ctx = live_context();
    scenarios::list_users_returns_non_empty(ctx.client())
        .await
        .expect("List scenario failed against the live API");
}

/// Creating a user echoes the generated unique email and assigns an id.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_create_user_echoes_email() {
    let ctx = live_context();
    scenarios::create_user_echoes_email(ctx.client())
        .await
        .expect("Create scenario failed against the live API");
}

/// A created user is readable by the id from the creation response.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_created_user_is_readable_by_id() {
    let ctx = live_context();
    scenarios::created_user_is_readable_by_id(ctx.client())
        .await
        .expect("Read-after-create scenario failed against the live API");
}

/// A partial rename is applied and visible on a follow-up read.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_patched_name_is_visible_on_read() {
    let ctx = live_context();
    scenarios::patched_name_is_visible_on_read(ctx.client())
        .await
        .expect("Update scenario failed against the live API");
}

/// A deleted user is gone: the follow-up read sees 404.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_deleted_user_is_gone() {
    let ctx = live_context();
    scenarios::deleted_user_is_gone(ctx.client())
        .await
        .expect("Delete scenario failed against the live API");
}

/// The whole suite through the shared fixture, one client for the run.
#[tokio::test]
#[ignore = "Requires live GoRest API credentials"]
async fn live_full_crud_suite() {
    let ctx = live_context();
    let results = ScenarioRunner::new(&ctx).run_all().await;

    let failed: Vec<_> = results.iter().filter(|r| !r.success).collect();
    assert!(failed.is_empty(), "Failed scenarios: {:#?}", failed);
}
