//! Driven port for todo persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Category, Todo, TodoId, TodoMutation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by todo repository adapters.
    pub enum TodoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "todo repository query failed: {message}",
    }
}

/// Port for storing and loading todo items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Load every todo ordered by creation time.
    async fn find_all(&self) -> Result<Vec<Todo>, TodoRepositoryError>;

    /// Find a todo by id.
    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Insert or replace a todo.
    async fn save(&self, todo: &Todo) -> Result<(), TodoRepositoryError>;

    /// Apply `mutation` to the stored todo inside one transaction.
    ///
    /// The record is locked, mutated through [`Todo::apply`] with `now`, and
    /// written back only when it changed. Returns `None` when no todo has the
    /// given id.
    async fn update(
        &self,
        id: &TodoId,
        mutation: &TodoMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Delete a todo, returning whether a record was removed.
    async fn delete_by_id(&self, id: &TodoId) -> Result<bool, TodoRepositoryError>;

    /// Delete every todo, returning the number removed.
    async fn delete_all(&self) -> Result<u64, TodoRepositoryError>;

    /// Delete every todo in `category`, returning the number removed.
    async fn delete_by_category(&self, category: &Category) -> Result<u64, TodoRepositoryError>;
}
