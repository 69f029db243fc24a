//! Helper functions for the scenario suite.
//!
//! This module provides common utilities for writing scenarios: unique
//! test-data generation, canonical payloads, logging setup, and environment
//! validation.

use anyhow::Result;
use chrono::Utc;
use gorest_client::config::{BASE_URL_VAR, CONFIG_PATH_VAR, TOKEN_VAR};
use gorest_client::{Gender, NewUser, UserStatus};
use std::env;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Generate a unique email address for user creation.
///
/// Format: `{prefix}.{timestamp}-{random}@example.com`. The remote service
/// enforces email uniqueness, so every creation needs a fresh address for
/// repeated runs to stay idempotent.
///
/// # Examples
///
/// ```
/// use integration_tests::helpers::unique_email;
///
/// let email = unique_email("test.user");
/// // Result: test.user.20260807120000-a1b2c3@example.com
/// assert!(email.starts_with("test.user."));
/// assert!(email.ends_with("@example.com"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let random_suffix = Uuid::new_v4().simple().to_string()[..6].to_lowercase();
    format!("{}.{}-{}@example.com", prefix, timestamp, random_suffix)
}

/// Canonical creation payload used by the scenarios.
///
/// Name, gender, and status are fixed; only the email varies per run.
pub fn test_user(email: impl Into<String>) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        email: email.into(),
        gender: Gender::Male,
        status: UserStatus::Active,
    }
}

/// Initialize logging for test runs.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Validate that a configuration source is available for a live run.
///
/// Either both environment variables are set, or the config file exists.
pub fn validate_test_environment() -> Result<()> {
    let have_env = env::var(BASE_URL_VAR).is_ok() && env::var(TOKEN_VAR).is_ok();
    let config_path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.json".to_string());

    if !have_env && !Path::new(&config_path).exists() {
        return Err(anyhow::anyhow!(
            "No configuration source found. Set {} and {}, or provide {}.",
            BASE_URL_VAR,
            TOKEN_VAR,
            config_path
        ));
    }

    info!("Test configuration source is available");
    Ok(())
}
