//! Client-side cache of todo items.
//!
//! Every action follows the same shape: mark the store as loading, call the
//! backend, merge the response into `items` or record the failure, and clear
//! `loading`. Completing a todo levels the profile up through the shared
//! [`ProfileStore`].

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiError, TodoApi};
use crate::model::{ALL_CATEGORIES, NewTodo, Todo, TodoUpdate};

use super::profile_store::ProfileStore;
use super::state_cell::{StateCell, StoreState};

const EMPTY_TEXT: &str = "Todo text cannot be empty";
const INVALID_CATEGORY: &str = "Select a valid category";

/// Snapshot of the todo store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    /// Cached todos in server order.
    pub items: Vec<Todo>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Most recent error, cleared automatically after a short delay.
    pub error: Option<String>,
}

impl StoreState for TodoState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

impl TodoState {
    fn merge(&mut self, todo: Todo) {
        let existing = self.items.iter().position(|item| item.id == todo.id);
        self.items.push(todo);
        // Swap-removing the stale entry moves the pushed one into its slot.
        if let Some(index) = existing {
            self.items.swap_remove(index);
        }
    }
}

/// Holds the todo list and forwards changes to the backend.
#[derive(Clone)]
pub struct TodoStore {
    api: Arc<dyn TodoApi>,
    profile: ProfileStore,
    cell: StateCell<TodoState>,
}

impl TodoStore {
    /// Create an empty store that levels `profile` up on completion.
    #[must_use]
    pub fn new(api: Arc<dyn TodoApi>, profile: ProfileStore) -> Self {
        Self::with_error_ttl(api, profile, super::DEFAULT_ERROR_TTL)
    }

    /// Create an empty store whose errors clear after `error_ttl`.
    #[must_use]
    pub fn with_error_ttl(api: Arc<dyn TodoApi>, profile: ProfileStore, error_ttl: Duration) -> Self {
        Self {
            api,
            profile,
            cell: StateCell::new(TodoState::default(), error_ttl),
        }
    }

    /// Replace the cache with the server's list.
    pub async fn load_all(&self) {
        self.cell.begin();
        match self.api.list_todos().await {
            Ok(items) => self.cell.settle(|state| state.items = items),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Create a todo. Blank text is rejected locally.
    pub async fn add(&self, text: impl Into<String>, category: Option<String>) {
        let new_todo = NewTodo {
            text: text.into(),
            category,
        };
        if new_todo.text.trim().is_empty() {
            self.cell.fail(EMPTY_TEXT);
            return;
        }
        self.cell.begin();
        match self.api.create_todo(new_todo).await {
            Ok(todo) => self.cell.settle(|state| state.items.push(todo)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Replace the text and, optionally, the category of a todo.
    pub async fn edit(&self, id: Uuid, text: impl Into<String>, category: Option<String>) {
        self.cell.begin();
        let update = TodoUpdate {
            text: text.into(),
            category,
        };
        match self.api.update_todo(id, update).await {
            Ok(todo) => self.cell.settle(|state| state.merge(todo)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Flip completion based on the server's current record.
    ///
    /// Completing a previously open todo levels the profile up once.
    pub async fn toggle(&self, id: Uuid) {
        self.cell.begin();
        match self.flip(id).await {
            Ok((was_completed, todo)) => {
                let completed_now = !was_completed && todo.completed;
                self.cell.settle(|state| state.merge(todo));
                if completed_now {
                    debug!(%id, "todo completed, levelling up");
                    self.profile.level_up().await;
                }
            }
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    async fn flip(&self, id: Uuid) -> Result<(bool, Todo), ApiError> {
        let current = self.api.get_todo(id).await?;
        let todo = if current.completed {
            self.api.incomplete_todo(id).await?
        } else {
            self.api.complete_todo(id).await?
        };
        Ok((current.completed, todo))
    }

    /// Delete one todo.
    pub async fn remove(&self, id: Uuid) {
        self.cell.begin();
        match self.api.delete_todo(id).await {
            Ok(()) => self.cell.settle(|state| state.items.retain(|item| item.id != id)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Delete every todo.
    pub async fn remove_all(&self) {
        self.cell.begin();
        match self.api.delete_all_todos().await {
            Ok(()) => self.cell.settle(|state| state.items.clear()),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Delete every todo in `category`.
    ///
    /// An empty category and the `"all"` pseudo-category are rejected
    /// locally. A failed request leaves the cache as it was.
    pub async fn remove_by_category(&self, category: &str) {
        if category.trim().is_empty() || category == ALL_CATEGORIES {
            self.cell.fail(INVALID_CATEGORY);
            return;
        }
        self.cell.begin();
        match self.api.delete_todos_by_category(category.to_owned()).await {
            Ok(()) => self
                .cell
                .settle(|state| state.items.retain(|item| item.category != category)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Drop the current error immediately.
    pub fn clear_error(&self) {
        self.cell.clear_error();
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> TodoState {
        self.cell.snapshot()
    }

    /// Number of cached todos not yet completed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cell
            .read(|state| state.items.iter().filter(|item| !item.completed).count())
    }

    /// Cached todos in `category`; `"all"` returns every item.
    #[must_use]
    pub fn items_in_category(&self, category: &str) -> Vec<Todo> {
        self.cell.read(|state| {
            if category == ALL_CATEGORIES {
                return state.items.clone();
            }
            state
                .items
                .iter()
                .filter(|item| item.category == category)
                .cloned()
                .collect()
        })
    }

    /// Profile store levelled up by this store.
    #[must_use]
    pub const fn profile(&self) -> &ProfileStore {
        &self.profile
    }
}

#[cfg(test)]
#[path = "todo_store_tests.rs"]
mod tests;
