//! Typed HTTP client and state stores for the todo backend.
//!
//! [`HttpApiClient`] speaks the backend's REST API. [`ClientStores`] owns one
//! [`ProfileStore`] and one [`TodoStore`] wired together so that completing a
//! todo levels the profile up. Stores are plain values; whoever builds them
//! passes them to the code that needs them.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use todo_client::{ClientConfig, ClientStores, HttpApiClient};
//! use url::Url;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new(Url::parse("http://localhost:8080/")?);
//! let api = Arc::new(HttpApiClient::new(config)?);
//! let stores = ClientStores::new(api);
//!
//! stores.profile().initialize().await;
//! stores.todos().load_all().await;
//! println!("{} left to do", stores.todos().remaining());
//! # Ok(())
//! # }
//! ```

mod api;
mod http;
mod model;
mod store;

pub use api::{ApiError, ProfileApi, TodoApi};
pub use http::{ClientConfig, DEFAULT_TIMEOUT, HttpApiClient};
pub use model::{ALL_CATEGORIES, NewTodo, Profile, ProfileUpdate, Todo, TodoUpdate};
pub use store::{
    ClientStores, DEFAULT_ERROR_TTL, ProfileState, ProfileStore, TodoState, TodoStore,
};
