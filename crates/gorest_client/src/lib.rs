//! Crate for interacting with the GoRest users REST API.
//!
//! This crate provides a typed client for making authenticated requests to
//! the remote users resource, carrying a bearer token on every request. The
//! client is built once from a [`ClientConfig`] and shared for the lifetime
//! of a test run.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};
use url::Url;

pub use reqwest::StatusCode;

pub mod config;
pub use config::ClientConfig;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Gender, NewUser, User, UserStatus, UserUpdate};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Collection endpoint for the users resource, relative to the base URL.
pub const USERS_ENDPOINT: &str = "public/v2/users";

/// A client for the remote users API, bound to a base URL and carrying
/// `Accept: application/json` and `Authorization: Bearer <token>` on every
/// request.
///
/// Cloning is cheap; the underlying HTTP client is reference-counted. The
/// client is read-only after construction and safe to share across
/// concurrently running scenarios.
#[derive(Clone, Debug)]
pub struct UserClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Creates a [`UserClient`] from a validated configuration.
///
/// The returned client has the base address and both default headers
/// pre-set; callers issue relative-path requests that are resolved against
/// the base URL. No retries and no timeout overrides beyond the transport
/// default.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the token cannot be used as a header
/// value, and [`Error::Transport`] if the underlying HTTP client cannot be
/// built.
///
/// # Example
///
/// ```rust,no_run
/// use gorest_client::{create_client, ClientConfig};
///
/// # fn main() -> Result<(), gorest_client::Error> {
/// let config = ClientConfig::new("https://gorest.co.in/", "my-token")?;
/// let client = create_client(&config)?;
/// # Ok(())
/// # }
/// ```
pub fn create_client(config: &ClientConfig) -> Result<UserClient, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let bearer = format!("Bearer {}", config.token().expose_secret());
    let mut auth = HeaderValue::from_str(&bearer).map_err(|_| {
        Error::Configuration(
            "Bearer token contains characters that are not valid in a header value".to_string(),
        )
    })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let http = reqwest::Client::builder()
        .default_headers(headers)
        .build()?;

    info!(base_url = %config.base_url(), "Created users API client");

    Ok(UserClient {
        http,
        base_url: config.base_url().clone(),
    })
}

impl UserClient {
    /// The base URL every relative path resolves against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Start an arbitrary request against a path relative to the base URL.
    ///
    /// The default headers are applied by the underlying client; this is
    /// the thin pass-through for endpoints the typed operations do not
    /// cover.
    pub fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, Error> {
        let url = self.base_url.join(path).map_err(|e| {
            Error::Configuration(format!("Path `{}` does not resolve against the base URL: {}", path, e))
        })?;
        debug!(method = %method, url = %url, "Building request");
        Ok(self.http.request(method, url))
    }

    /// Fetches the user collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] unless the server answers
    /// `200 OK`, and [`Error::Decode`] if the body is not a user array.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        let response = self.request(Method::GET, USERS_ENDPOINT)?.send().await?;
        let response = expect_status(response, StatusCode::OK).await?;
        let users: Vec<User> = decode(response).await?;
        info!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Creates a user and returns the server's view of it, including the
    /// assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedStatus`] unless the server answers
    /// `201 Created`. A uniqueness rejection (422) surfaces through the
    /// same variant with the raw body attached.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User, Error> {
        let response = self
            .request(Method::POST, USERS_ENDPOINT)?
            .json(user)
            .send()
            .await?;
        let response = expect_status(response, StatusCode::CREATED).await?;
        let created: User = decode(response).await?;
        info!(id = created.id, "Created user");
        Ok(created)
    }

    /// Fetches a single user by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the server answers 404, which is
    /// the expected outcome after a delete.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: u64) -> Result<User, Error> {
        let response = self.request(Method::GET, &item_path(id))?.send().await?;
        match response.status() {
            StatusCode::OK => decode(response).await,
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            _ => Err(unexpected(StatusCode::OK, response).await),
        }
    }

    /// Applies a partial update to a user and returns the updated entity.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<User, Error> {
        let response = self
            .request(Method::PATCH, &item_path(id))?
            .json(update)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => {
                let updated: User = decode(response).await?;
                info!(id = updated.id, "Updated user");
                Ok(updated)
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            _ => Err(unexpected(StatusCode::OK, response).await),
        }
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the user does not exist, and
    /// [`Error::UnexpectedStatus`] unless the server answers
    /// `204 No Content`.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: u64) -> Result<(), Error> {
        let response = self.request(Method::DELETE, &item_path(id))?.send().await?;
        match response.status() {
            StatusCode::NO_CONTENT => {
                info!(id, "Deleted user");
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(Error::NotFound),
            _ => Err(unexpected(StatusCode::NO_CONTENT, response).await),
        }
    }
}

fn item_path(id: u64) -> String {
    format!("{}/{}", USERS_ENDPOINT, id)
}

/// Require the expected status; any other status becomes
/// [`Error::UnexpectedStatus`] with the raw body attached.
async fn expect_status(response: Response, expected: StatusCode) -> Result<Response, Error> {
    if response.status() == expected {
        Ok(response)
    } else {
        Err(unexpected(expected, response).await)
    }
}

/// Build the status-mismatch error, reading the body best-effort for
/// diagnostics.
async fn unexpected(expected: StatusCode, response: Response) -> Error {
    let actual = response.status();
    let body = response.text().await.unwrap_or_default();
    Error::UnexpectedStatus {
        expected,
        actual,
        body,
    }
}

/// Decode a JSON body, keeping the raw text for the error report when the
/// shape does not match.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| Error::Decode { source, body })
}
