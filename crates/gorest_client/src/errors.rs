//! Error types for users API client operations.
//!
//! This module defines the error types that can occur when configuring or
//! talking to the remote users API through the gorest_client crate.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

use reqwest::StatusCode;

/// Errors that can occur during users API client operations.
///
/// Each variant maps to one failure class: configuration problems surface
/// before any request is made, transport problems come from the HTTP layer,
/// and the remaining variants describe responses that did not match the
/// expected contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing or malformed configuration.
    ///
    /// This error occurs when:
    /// - A required environment variable or config-file field is absent
    /// - The base URL is not a well-formed absolute http(s) URI
    /// - The bearer token is empty or not usable as a header value
    ///
    /// The contained string names the offending setting.
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The HTTP request could not be completed.
    ///
    /// Connection refused, DNS failure, or any other transport-level
    /// problem reported by the underlying client. Not retried.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status code other than the expected one.
    ///
    /// Carries the raw response body so scenario diagnostics can show what
    /// the server actually said.
    #[error("Expected status {expected}, got {actual}: {body}")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
        body: String,
    },

    /// The response body does not match the expected schema.
    #[error("Failed to decode response body: {source}; body was: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The addressed user does not exist (404 from an item endpoint).
    #[error("User not found")]
    NotFound,
}
