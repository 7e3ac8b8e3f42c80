//! Wire types exchanged with the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pseudo-category that selects every todo when filtering.
pub const ALL_CATEGORIES: &str = "all";

/// A todo as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Todo text.
    pub text: String,
    /// Free-form category label.
    pub category: String,
    /// Completion flag.
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last effective change.
    pub updated_at: DateTime<Utc>,
}

/// The player profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// Current level, starting at 1.
    pub level: i64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last change.
    pub updated_at: DateTime<Utc>,
}

/// Body for `POST /todos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    /// Todo text.
    pub text: String,
    /// Category; the server applies its default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body for `PUT /todos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    /// Replacement text.
    pub text: String,
    /// Replacement category; the server applies its default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body for `PUT /profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New username, if it should change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Subset of the backend error envelope the client reads.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub(crate) message: String,
}
