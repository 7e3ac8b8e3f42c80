//! State stores for UI code.
//!
//! Stores are constructed explicitly and handed to whoever needs them; there
//! is no process-wide instance.

mod profile_store;
mod state_cell;
mod todo_store;

use std::sync::Arc;
use std::time::Duration;

use crate::api::{ProfileApi, TodoApi};

pub use profile_store::{ProfileState, ProfileStore};
pub use todo_store::{TodoState, TodoStore};

/// How long an error stays visible before it is cleared automatically.
pub const DEFAULT_ERROR_TTL: Duration = Duration::from_secs(3);

/// One profile store and one todo store wired to it.
#[derive(Clone)]
pub struct ClientStores {
    todos: TodoStore,
    profile: ProfileStore,
}

impl ClientStores {
    /// Build both stores on top of one API implementation.
    #[must_use]
    pub fn new<A>(api: Arc<A>) -> Self
    where
        A: TodoApi + ProfileApi + 'static,
    {
        let profile_api: Arc<dyn ProfileApi> = api.clone();
        let todo_api: Arc<dyn TodoApi> = api;
        let profile = ProfileStore::new(profile_api);
        Self {
            todos: TodoStore::new(todo_api, profile.clone()),
            profile,
        }
    }

    /// Todo list store.
    #[must_use]
    pub const fn todos(&self) -> &TodoStore {
        &self.todos
    }

    /// Profile store shared with [`ClientStores::todos`].
    #[must_use]
    pub const fn profile(&self) -> &ProfileStore {
        &self.profile
    }
}
