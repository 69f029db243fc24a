//! In-process stand-in for the remote users API.
//!
//! Serves the same endpoint shape, status codes, and error bodies as the
//! live service, backed by process memory. Hermetic tests point the shared
//! client at this server and run the full lifecycle without credentials.

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use gorest_client::{ClientConfig, NewUser, User, UserUpdate};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

#[derive(Clone)]
struct ApiState {
    token: String,
    users: Arc<Mutex<HashMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
}

/// A users API served from process memory for hermetic scenario tests.
pub struct MockUsersApi {
    base_url: String,
    state: ApiState,
    handle: JoinHandle<()>,
}

impl MockUsersApi {
    /// Bearer token the mock accepts on write operations.
    pub const TOKEN: &'static str = "mock-api-token";

    /// Bind to an ephemeral local port and start serving.
    pub async fn start() -> Result<Self> {
        let state = ApiState {
            token: Self::TOKEN.to_string(),
            users: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        };

        let app = Router::new()
            .route("/public/v2/users", get(list_users).post(create_user))
            .route(
                "/public/v2/users/:id",
                get(get_user).patch(update_user).delete(delete_user),
            )
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind the mock API listener")?;
        let addr = listener
            .local_addr()
            .context("Failed to read the mock API address")?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                info!(error = %e, "Mock API server stopped");
            }
        });

        let base_url = format!("http://{}/", addr);
        info!(base_url = base_url.as_str(), "Mock users API started");

        Ok(Self {
            base_url,
            state,
            handle,
        })
    }

    /// The base URL the server listens on.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration pointing at this server with the accepted
    /// token.
    pub fn client_config(&self) -> Result<ClientConfig> {
        ClientConfig::new(&self.base_url, Self::TOKEN)
            .context("Mock API base URL rejected by the client configuration")
    }

    /// Insert a user directly into the store, bypassing HTTP.
    ///
    /// Used to make the collection non-empty before list scenarios.
    pub fn seed(&self, payload: &NewUser) -> User {
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
            gender: payload.gender,
            status: payload.status,
        };
        self.state
            .users
            .lock()
            .unwrap()
            .insert(id, user.clone());
        user
    }

    /// Number of users currently in the store.
    pub fn user_count(&self) -> usize {
        self.state.users.lock().unwrap().len()
    }
}

impl Drop for MockUsersApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn authorized(state: &ApiState, headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", state.token);
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid token" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Resource not found" })),
    )
        .into_response()
}

async fn list_users(State(state): State<ApiState>) -> Json<Vec<User>> {
    let users = state.users.lock().unwrap();
    let mut list: Vec<User> = users.values().cloned().collect();
    list.sort_by_key(|u| u.id);
    Json(list)
}

async fn create_user(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(payload): Json<NewUser>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let mut users = state.users.lock().unwrap();
    if users.values().any(|u| u.email == payload.email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!([
                { "field": "email", "message": "has already been taken" }
            ])),
        )
            .into_response();
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let user = User {
        id,
        name: payload.name,
        email: payload.email,
        gender: payload.gender,
        status: payload.status,
    };
    users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn get_user(State(state): State<ApiState>, Path(id): Path<u64>) -> Response {
    match state.users.lock().unwrap().get(&id) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => not_found(),
    }
}

async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(update): Json<UserUpdate>,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    let mut users = state.users.lock().unwrap();
    match users.get_mut(&id) {
        Some(user) => {
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            if let Some(gender) = update.gender {
                user.gender = gender;
            }
            if let Some(status) = update.status {
                user.status = status;
            }
            (StatusCode::OK, Json(user.clone())).into_response()
        }
        None => not_found(),
    }
}

async fn delete_user(
    State(state): State<ApiState>,
    Path(id): Path<u64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&state, &headers) {
        return unauthorized();
    }

    match state.users.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}
