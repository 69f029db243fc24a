//! Client configuration.
//!
//! Configuration is two values: the absolute base URL of the remote API and
//! the bearer token used on every request. It is loaded once per test run,
//! from environment variables or from a JSON config file.

use secrecy::SecretString;
use serde::Deserialize;
use std::env;
use std::path::Path;
use url::Url;

use crate::errors::Error;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable holding the API base URL.
pub const BASE_URL_VAR: &str = "GOREST_BASE_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "GOREST_API_TOKEN";

/// Environment variable overriding the config file path.
pub const CONFIG_PATH_VAR: &str = "GOREST_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Immutable configuration for the shared API client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: Url,
    token: SecretString,
}

/// On-disk shape of the config file.
#[derive(Deserialize)]
struct ConfigFile {
    base_url: String,
    token: String,
}

impl ClientConfig {
    /// Validate and construct a configuration.
    ///
    /// Fails unless `base_url` parses as an absolute http(s) URI and the
    /// token is non-empty. The base URL path is normalized to end with a
    /// slash so relative endpoint paths resolve underneath it instead of
    /// replacing its last segment.
    pub fn new(base_url: &str, token: &str) -> Result<Self, Error> {
        let mut url = Url::parse(base_url).map_err(|e| {
            Error::Configuration(format!(
                "Base URL `{}` is not a valid absolute URI: {}",
                base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "Base URL `{}` must use the http or https scheme",
                base_url
            )));
        }

        if token.trim().is_empty() {
            return Err(Error::Configuration(
                "Bearer token must not be empty".to_string(),
            ));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            base_url: url,
            token: SecretString::from(token.to_string()),
        })
    }

    /// Load configuration from `GOREST_BASE_URL` and `GOREST_API_TOKEN`.
    pub fn from_env() -> Result<Self, Error> {
        let base_url = env::var(BASE_URL_VAR).map_err(|_| {
            Error::Configuration(format!("{} environment variable not set", BASE_URL_VAR))
        })?;
        let token = env::var(TOKEN_VAR).map_err(|_| {
            Error::Configuration(format!("{} environment variable not set", TOKEN_VAR))
        })?;
        Self::new(&base_url, &token)
    }

    /// Load configuration from a JSON file of the form
    /// `{ "base_url": "...", "token": "..." }`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let parsed: ConfigFile = serde_json::from_str(&raw).map_err(|e| {
            Error::Configuration(format!(
                "Configuration file {} is not valid JSON: {}",
                path.display(),
                e
            ))
        })?;
        Self::new(&parsed.base_url, &parsed.token)
    }

    /// Load configuration from the environment, falling back to the config
    /// file when neither environment variable is set.
    ///
    /// A partially-set environment (one variable of the two) is an error
    /// rather than a silent fallback. The file path defaults to
    /// `config.json` and can be overridden via `GOREST_CONFIG`.
    pub fn load() -> Result<Self, Error> {
        let have_base = env::var(BASE_URL_VAR).is_ok();
        let have_token = env::var(TOKEN_VAR).is_ok();

        if have_base || have_token {
            return Self::from_env();
        }

        let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(path)
    }

    /// The validated base URL. Always carries a trailing slash on its path.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The bearer credential. Exposed only at header-construction time.
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}
