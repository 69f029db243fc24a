//! Request and response schema types for the users resource.
//!
//! The remote entity under test is a user identified by a server-assigned
//! id. These types mirror the wire shape exactly; enum values serialize in
//! lowercase as the API expects.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// Gender of a user as reported by the API.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Account status of a user.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// A user as returned by the remote API.
///
/// The `id` is assigned by the server on creation and is the only
/// identifier assumed stable afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct User {
    /// Server-assigned, immutable once created.
    pub id: u64,
    pub name: String,
    /// Unique across the remote service.
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// Payload for creating a user. The server assigns the id.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub status: UserStatus,
}

/// Partial update payload for PATCH requests.
///
/// Fields left `None` are omitted from the serialized body, so the server
/// only touches the fields that are present.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserUpdate {
    /// An update that only renames the user.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
