//! Driving port for todo reads.

use async_trait::async_trait;

use crate::domain::{Error, Todo, TodoId};

/// Driving port for reading todo items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// List every todo in creation order.
    async fn list_all(&self) -> Result<Vec<Todo>, Error>;

    /// Fetch one todo.
    ///
    /// Returns an [`crate::domain::ErrorCode::NotFound`] error when the id is
    /// unknown.
    async fn get_by_id(&self, id: TodoId) -> Result<Todo, Error>;
}
