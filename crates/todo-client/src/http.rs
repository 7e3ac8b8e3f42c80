//! reqwest-backed implementation of the API ports.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::api::{ApiError, ProfileApi, TodoApi};
use crate::model::{ErrorEnvelope, NewTodo, Profile, ProfileUpdate, Todo, TodoUpdate};

/// Timeout applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`HttpApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Duration,
}

impl ClientConfig {
    /// Target `base_url`, which may include a path prefix such as `/api`.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// HTTP client for the todo backend.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: Url,
}

fn map_reqwest_error(error: &reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else if error.is_decode() {
        ApiError::Decode {
            message: error.to_string(),
        }
    } else {
        ApiError::Transport {
            message: error.to_string(),
        }
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.json::<ErrorEnvelope>().await.map_or_else(
        |_| format!("API Error: {}", status.as_u16()),
        |envelope| envelope.message,
    );
    debug!(status = status.as_u16(), %message, "request failed");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

impl HttpApiClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidInput`] when the base URL cannot carry a
    /// path and [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let ClientConfig { base_url, timeout } = config;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidInput {
                message: format!("{base_url} cannot be used as a base URL"),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| map_reqwest_error(&err))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client.request(method, self.endpoint(segments))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|err| map_reqwest_error(&err))?;
        ensure_success(response).await
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|err| map_reqwest_error(&err))
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        let response = self.send(builder).await?;
        if response.status() != StatusCode::NO_CONTENT {
            debug!(status = response.status().as_u16(), "ignoring response body");
        }
        Ok(())
    }
}

#[async_trait]
impl TodoApi for HttpApiClient {
    async fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        self.fetch(self.request(Method::GET, &["todos"])).await
    }

    async fn get_todo(&self, id: Uuid) -> Result<Todo, ApiError> {
        let todo_id = id.to_string();
        self.fetch(self.request(Method::GET, &["todos", &todo_id])).await
    }

    async fn create_todo(&self, todo: NewTodo) -> Result<Todo, ApiError> {
        self.fetch(self.request(Method::POST, &["todos"]).json(&todo))
            .await
    }

    async fn update_todo(&self, id: Uuid, update: TodoUpdate) -> Result<Todo, ApiError> {
        let todo_id = id.to_string();
        self.fetch(self.request(Method::PUT, &["todos", &todo_id]).json(&update))
            .await
    }

    async fn complete_todo(&self, id: Uuid) -> Result<Todo, ApiError> {
        let todo_id = id.to_string();
        self.fetch(self.request(Method::PATCH, &["todos", &todo_id, "complete"]))
            .await
    }

    async fn incomplete_todo(&self, id: Uuid) -> Result<Todo, ApiError> {
        let todo_id = id.to_string();
        self.fetch(self.request(Method::PATCH, &["todos", &todo_id, "incomplete"]))
            .await
    }

    async fn delete_todo(&self, id: Uuid) -> Result<(), ApiError> {
        let todo_id = id.to_string();
        self.execute(self.request(Method::DELETE, &["todos", &todo_id]))
            .await
    }

    async fn delete_all_todos(&self) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["todos"])).await
    }

    async fn delete_todos_by_category(&self, category: String) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, &["todos", "category", &category]))
            .await
    }
}

#[async_trait]
impl ProfileApi for HttpApiClient {
    async fn get_profile(&self) -> Result<Profile, ApiError> {
        self.fetch(self.request(Method::GET, &["profile"])).await
    }

    async fn create_profile(&self, username: String) -> Result<Profile, ApiError> {
        let body = serde_json::json!({ "username": username });
        self.fetch(self.request(Method::POST, &["profile"]).json(&body))
            .await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile, ApiError> {
        self.fetch(self.request(Method::PUT, &["profile"]).json(&update))
            .await
    }

    async fn level_up(&self) -> Result<Profile, ApiError> {
        self.fetch(self.request(Method::POST, &["profile", "level-up"]))
            .await
    }
}
