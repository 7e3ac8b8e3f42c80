//! Todo HTTP handlers.
//!
//! ```text
//! GET    /todos
//! POST   /todos
//! DELETE /todos
//! GET    /todos/{id}
//! PUT    /todos/{id}
//! DELETE /todos/{id}
//! PATCH  /todos/{id}/complete
//! PATCH  /todos/{id}/incomplete
//! DELETE /todos/category/{category}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Todo;
use crate::domain::ports::{CreateTodoRequest, UpdateTodoRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_todo_id;

/// Request payload for creating or editing a todo.
///
/// A missing `text` is treated as blank so it fails the same validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoBody {
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub text: Option<String>,
    #[serde(default)]
    #[schema(example = "shopping")]
    pub category: Option<String>,
}

impl TodoBody {
    fn into_parts(self) -> (String, Option<String>) {
        (self.text.unwrap_or_default(), self.category)
    }
}

/// Response payload for a single todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub text: String,
    pub category: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(value: Todo) -> Self {
        Self {
            id: value.id().to_string(),
            text: value.text().as_str().to_owned(),
            category: value.category().as_str().to_owned(),
            completed: value.completed(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// List every todo, oldest first.
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "All todos", body = [TodoResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "listTodos"
)]
#[get("/todos")]
pub async fn list_todos(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TodoResponse>>> {
    let todos = state.todos_query.list_all().await?;
    Ok(web::Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Fetch one todo.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "The todo", body = TodoResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "getTodo"
)]
#[get("/todos/{id}")]
pub async fn get_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path.into_inner())?;
    let todo = state.todos_query.get_by_id(id).await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Create a todo. The category defaults to `personal`.
#[utoipa::path(
    post,
    path = "/todos",
    request_body = TodoBody,
    responses(
        (status = 201, description = "Created todo", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "createTodo"
)]
#[post("/todos")]
pub async fn create_todo(
    state: web::Data<HttpState>,
    payload: web::Json<TodoBody>,
) -> ApiResult<HttpResponse> {
    let (text, category) = payload.into_inner().into_parts();
    let todo = state
        .todos
        .create(CreateTodoRequest { text, category })
        .await?;
    Ok(HttpResponse::Created().json(TodoResponse::from(todo)))
}

/// Replace a todo's text and category.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    request_body = TodoBody,
    responses(
        (status = 200, description = "Updated todo", body = TodoResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Todo not found", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "updateTodo"
)]
#[put("/todos/{id}")]
pub async fn update_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<TodoBody>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path.into_inner())?;
    let (text, category) = payload.into_inner().into_parts();
    let todo = state
        .todos
        .update(id, UpdateTodoRequest { text, category })
        .await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Mark a todo as completed.
#[utoipa::path(
    patch,
    path = "/todos/{id}/complete",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Completed todo", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "completeTodo"
)]
#[patch("/todos/{id}/complete")]
pub async fn complete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path.into_inner())?;
    let todo = state.todos.complete(id).await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Mark a todo as not completed.
#[utoipa::path(
    patch,
    path = "/todos/{id}/incomplete",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 200, description = "Reopened todo", body = TodoResponse),
        (status = 404, description = "Todo not found", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "incompleteTodo"
)]
#[patch("/todos/{id}/incomplete")]
pub async fn incomplete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TodoResponse>> {
    let id = parse_todo_id(&path.into_inner())?;
    let todo = state.todos.incomplete(id).await?;
    Ok(web::Json(TodoResponse::from(todo)))
}

/// Delete one todo. Deleting an absent todo still succeeds.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(("id" = String, Path, description = "Todo identifier")),
    responses(
        (status = 204, description = "Todo deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema)
    ),
    tags = ["todos"],
    operation_id = "deleteTodo"
)]
#[delete("/todos/{id}")]
pub async fn delete_todo(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_todo_id(&path.into_inner())?;
    state.todos.delete_by_id(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every todo.
#[utoipa::path(
    delete,
    path = "/todos",
    responses((status = 204, description = "All todos deleted")),
    tags = ["todos"],
    operation_id = "deleteAllTodos"
)]
#[delete("/todos")]
pub async fn delete_all_todos(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.todos.delete_all().await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete every todo in a category.
#[utoipa::path(
    delete,
    path = "/todos/category/{category}",
    params(("category" = String, Path, description = "Category label")),
    responses((status = 204, description = "Category cleared")),
    tags = ["todos"],
    operation_id = "deleteTodosByCategory"
)]
#[delete("/todos/category/{category}")]
pub async fn delete_todos_by_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.todos.delete_by_category(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "todos_tests.rs"]
mod tests;
