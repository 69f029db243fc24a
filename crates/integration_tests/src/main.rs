//! Scenario runner for the GoRest users API harness.
//!
//! This binary drives the CRUD lifecycle scenarios against the configured
//! remote API: one shared client is built before the first scenario, every
//! scenario reports pass/fail with diagnostics, and the fixture is released
//! after the last one regardless of outcomes.
//!
//! ## Usage
//!
//! ```bash
//! # Run all scenarios
//! cargo run --bin integration_tests
//!
//! # Run a single scenario
//! cargo run --bin integration_tests -- --scenario delete
//! ```
//!
//! ## Environment Variables
//!
//! - `GOREST_BASE_URL`: absolute base URL of the remote API
//! - `GOREST_API_TOKEN`: bearer token sent on every request
//!
//! Alternatively provide a `config.json` with `base_url` and `token`
//! (path overridable via `GOREST_CONFIG`).

use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::process;
use tracing::{error, info};

use integration_tests::helpers::{init_logging, validate_test_environment};
use integration_tests::{Scenario, ScenarioRunner, TestContext};

#[tokio::main]
async fn main() {
    // Initialize logging first
    init_logging();

    // Parse command line arguments
    let matches = Command::new("integration_tests")
        .about("CRUD lifecycle scenarios for the GoRest users API")
        .arg(
            Arg::new("scenario")
                .long("scenario")
                .help("Run only the named scenario (list, create, read-after-create, update, delete)")
                .value_name("NAME"),
        )
        .get_matches();

    if let Err(e) = run_scenarios(&matches).await {
        error!(error = format!("{:#}", e), "Scenario run failed");
        process::exit(1);
    }
}

async fn run_scenarios(matches: &clap::ArgMatches) -> Result<()> {
    info!("Starting users API scenario run");

    // Validate environment
    validate_test_environment().context("Environment validation failed")?;

    // One-time setup: load configuration and build the shared client.
    let mut ctx =
        TestContext::initialize().context("Failed to initialize the shared test fixture")?;
    info!(base_url = ctx.base_url(), "Targeting remote API");

    let scenarios: Vec<Scenario> = match matches.get_one::<String>("scenario") {
        Some(name) => {
            let scenario = Scenario::from_name(name)
                .with_context(|| format!("Unknown scenario `{}`", name))?;
            vec![scenario]
        }
        None => Scenario::ALL.to_vec(),
    };

    let results = ScenarioRunner::new(&ctx).run(&scenarios).await;

    // Process and report results
    let total = results.len();
    let mut failed = 0;

    info!("=== Scenario Results ===");
    for result in &results {
        let status = if result.success { "PASS" } else { "FAIL" };
        info!(
            scenario = result.scenario.name(),
            status,
            duration_ms = result.duration.as_millis() as u64,
            "Scenario result"
        );

        if let Some(error) = &result.error {
            error!(
                scenario = result.scenario.name(),
                error = error.as_str(),
                "Failure details"
            );
        }

        if !result.success {
            failed += 1;
        }
    }

    // Summary
    info!(
        total,
        passed = total - failed,
        failed,
        "=== Suite Summary ==="
    );

    // Teardown runs regardless of scenario outcomes.
    ctx.shutdown();

    if failed > 0 {
        anyhow::bail!("{} of {} scenarios failed", failed, total);
    }

    info!("All scenarios passed");
    Ok(())
}
