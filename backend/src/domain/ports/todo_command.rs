//! Driving port for todo mutations.
//!
//! Requests carry raw strings; implementations validate them into domain value
//! objects before touching storage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Todo, TodoId};

/// Request to create a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub text: String,
    /// Defaults to [`crate::domain::DEFAULT_CATEGORY`] when absent.
    pub category: Option<String>,
}

/// Request to replace a todo's text and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub text: String,
    /// Defaults to [`crate::domain::DEFAULT_CATEGORY`] when absent.
    pub category: Option<String>,
}

/// Driving port for todo write operations.
///
/// `complete` and `incomplete` are idempotent: repeating either returns the
/// todo unchanged, including its `updated_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Create a todo and return the stored record.
    async fn create(&self, request: CreateTodoRequest) -> Result<Todo, Error>;

    /// Replace text and category of an existing todo.
    async fn update(&self, id: TodoId, request: UpdateTodoRequest) -> Result<Todo, Error>;

    /// Mark a todo completed.
    async fn complete(&self, id: TodoId) -> Result<Todo, Error>;

    /// Mark a todo not completed.
    async fn incomplete(&self, id: TodoId) -> Result<Todo, Error>;

    /// Delete a todo. Deleting an unknown id succeeds.
    async fn delete_by_id(&self, id: TodoId) -> Result<(), Error>;

    /// Delete every todo.
    async fn delete_all(&self) -> Result<(), Error>;

    /// Delete every todo whose category equals `category` exactly.
    async fn delete_by_category(&self, category: String) -> Result<(), Error>;
}
