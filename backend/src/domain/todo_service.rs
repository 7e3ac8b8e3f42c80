//! Todo domain service.
//!
//! Implements the todo driving ports over a [`TodoRepository`]. Raw request
//! strings are validated here so nothing reaches storage unless it satisfies
//! the todo invariants. Read-modify-write operations are delegated to
//! [`TodoRepository::update`], which runs them as one transaction.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateTodoRequest, TodoCommand, TodoQuery, TodoRepository, TodoRepositoryError,
    UpdateTodoRequest,
};
use crate::domain::{Category, Error, Todo, TodoId, TodoMutation, TodoText, TodoValidationError};
use crate::domain::timestamp::stored_now;

fn map_repository_error(error: TodoRepositoryError) -> Error {
    match error {
        TodoRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("todo repository unavailable: {message}"))
        }
        TodoRepositoryError::Query { message } => {
            Error::internal(format!("todo repository error: {message}"))
        }
    }
}

fn validation_error(error: &TodoValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn todo_not_found(id: TodoId) -> Error {
    Error::not_found(format!("todo {id} not found")).with_details(json!({
        "id": id.to_string(),
        "code": "todo_not_found",
    }))
}

fn parse_fields(text: String, category: Option<String>) -> Result<(TodoText, Category), Error> {
    let text = TodoText::new(text).map_err(|err| validation_error(&err))?;
    let category = Category::or_default(category).map_err(|err| validation_error(&err))?;
    Ok((text, category))
}

/// Todo service implementing [`TodoQuery`] and [`TodoCommand`].
#[derive(Clone)]
pub struct TodoService<R> {
    todo_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TodoService<R> {
    /// Create a new service over the todo repository and clock.
    pub fn new(todo_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { todo_repo, clock }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    async fn mutate(&self, id: TodoId, mutation: TodoMutation) -> Result<Todo, Error> {
        let now = stored_now(self.clock.as_ref());
        self.todo_repo
            .update(&id, &mutation, now)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| todo_not_found(id))
    }
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_all(&self) -> Result<Vec<Todo>, Error> {
        let todos = self
            .todo_repo
            .find_all()
            .await
            .map_err(map_repository_error)?;
        debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn get_by_id(&self, id: TodoId) -> Result<Todo, Error> {
        self.todo_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| todo_not_found(id))
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn create(&self, request: CreateTodoRequest) -> Result<Todo, Error> {
        let CreateTodoRequest { text, category } = request;
        let (text, category) = parse_fields(text, category)?;
        let todo = Todo::create(text, category, stored_now(self.clock.as_ref()));

        self.todo_repo
            .save(&todo)
            .await
            .map_err(map_repository_error)?;

        info!(todo_id = %todo.id(), category = %todo.category(), "todo created");
        Ok(todo)
    }

    async fn update(&self, id: TodoId, request: UpdateTodoRequest) -> Result<Todo, Error> {
        let UpdateTodoRequest { text, category } = request;
        let (text, category) = parse_fields(text, category)?;
        let todo = self.mutate(id, TodoMutation::Edit { text, category }).await?;
        info!(todo_id = %id, "todo updated");
        Ok(todo)
    }

    async fn complete(&self, id: TodoId) -> Result<Todo, Error> {
        let todo = self.mutate(id, TodoMutation::Complete).await?;
        info!(todo_id = %id, "todo marked completed");
        Ok(todo)
    }

    async fn incomplete(&self, id: TodoId) -> Result<Todo, Error> {
        let todo = self.mutate(id, TodoMutation::Incomplete).await?;
        info!(todo_id = %id, "todo marked incomplete");
        Ok(todo)
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), Error> {
        let removed = self
            .todo_repo
            .delete_by_id(&id)
            .await
            .map_err(map_repository_error)?;
        info!(todo_id = %id, removed, "todo delete requested");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), Error> {
        let removed = self
            .todo_repo
            .delete_all()
            .await
            .map_err(map_repository_error)?;
        info!(removed, "all todos deleted");
        Ok(())
    }

    async fn delete_by_category(&self, category: String) -> Result<(), Error> {
        // A label that fails validation can never have been stored.
        let Ok(category) = Category::new(category) else {
            debug!("category delete skipped for label that cannot match");
            return Ok(());
        };
        let removed = self
            .todo_repo
            .delete_by_category(&category)
            .await
            .map_err(map_repository_error)?;
        info!(category = %category, removed, "todos deleted by category");
        Ok(())
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
