//! Client-side ports for talking to the backend.
//!
//! Stores depend on these traits rather than on [`crate::HttpApiClient`] so
//! they can be driven by mocks in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{NewTodo, Profile, ProfileUpdate, Todo, TodoUpdate};

/// Failures surfaced by API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or `API Error: <status>`.
        message: String,
    },
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The request could not be sent or the connection failed.
    #[error("transport error: {message}")]
    Transport {
        /// Underlying error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Underlying error description.
        message: String,
    },
    /// The request was rejected before reaching the network.
    #[error("{message}")]
    InvalidInput {
        /// Reason the input was rejected.
        message: String,
    },
}

impl ApiError {
    /// HTTP status carried by [`ApiError::Status`].
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Todo endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoApi: Send + Sync {
    /// `GET /todos`
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError>;

    /// `GET /todos/{id}`
    async fn get_todo(&self, id: Uuid) -> Result<Todo, ApiError>;

    /// `POST /todos`
    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, ApiError>;

    /// `PUT /todos/{id}`
    async fn update_todo(&self, id: Uuid, update: TodoUpdate) -> Result<Todo, ApiError>;

    /// `PATCH /todos/{id}/complete`
    async fn complete_todo(&self, id: Uuid) -> Result<Todo, ApiError>;

    /// `PATCH /todos/{id}/incomplete`
    async fn incomplete_todo(&self, id: Uuid) -> Result<Todo, ApiError>;

    /// `DELETE /todos/{id}`
    async fn delete_todo(&self, id: Uuid) -> Result<(), ApiError>;

    /// `DELETE /todos`
    async fn delete_all_todos(&self) -> Result<(), ApiError>;

    /// `DELETE /todos/category/{category}`
    async fn delete_todos_by_category(&self, category: String) -> Result<(), ApiError>;
}

/// Profile endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// `GET /profile`
    async fn get_profile(&self) -> Result<Profile, ApiError>;

    /// `POST /profile`
    async fn create_profile(&self, username: String) -> Result<Profile, ApiError>;

    /// `PUT /profile`
    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, ApiError>;

    /// `POST /profile/level-up`
    async fn level_up(&self) -> Result<Profile, ApiError>;
}
