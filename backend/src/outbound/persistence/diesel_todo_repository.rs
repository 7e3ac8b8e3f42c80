//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Mutations of existing todos lock the row with `SELECT ... FOR UPDATE`,
//! apply the domain mutation, and write back inside a single transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{
    Category, Todo, TodoDraft, TodoId, TodoMutation, TodoText, TodoValidationError,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewTodoRow, TodoRow, TodoUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::todos;

/// Diesel-backed implementation of the todo repository port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TodoRepositoryError {
    map_basic_pool_error(error, TodoRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> TodoRepositoryError {
    map_basic_diesel_error(
        error,
        TodoRepositoryError::query,
        TodoRepositoryError::connection,
    )
}

fn count(affected: usize) -> u64 {
    u64::try_from(affected).unwrap_or(u64::MAX)
}

/// Convert a database row into a validated domain todo.
fn row_to_todo(row: TodoRow) -> Result<Todo, TodoValidationError> {
    let TodoRow {
        id,
        text,
        category,
        completed,
        created_at,
        updated_at,
    } = row;

    Ok(Todo::restore(TodoDraft {
        id: TodoId::from_uuid(id),
        text: TodoText::new(text)?,
        category: Category::new(category)?,
        completed,
        created_at,
        updated_at,
    }))
}

fn changeset(todo: &Todo) -> TodoUpdate<'_> {
    TodoUpdate {
        text: todo.text().as_str(),
        category: todo.category().as_str(),
        completed: todo.completed(),
        updated_at: todo.updated_at(),
    }
}

/// Lock, mutate, and write back one todo. Runs inside a transaction.
async fn lock_and_apply(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    mutation: &TodoMutation,
    now: DateTime<Utc>,
) -> Result<Option<Todo>, DieselError> {
    let row = todos::table
        .filter(todos::id.eq(id))
        .select(TodoRow::as_select())
        .for_update()
        .first::<TodoRow>(conn)
        .await
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut todo = row_to_todo(row).map_err(|err| DieselError::DeserializationError(Box::new(err)))?;

    if todo.apply(mutation, now) {
        diesel::update(todos::table.filter(todos::id.eq(id)))
            .set(&changeset(&todo))
            .execute(conn)
            .await?;
    }
    Ok(Some(todo))
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TodoRow> = todos::table
            .order((todos::created_at.asc(), todos::id.asc()))
            .select(TodoRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_todo(row).map_err(|err| TodoRepositoryError::query(err.to_string())))
            .collect()
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = todos::table
            .filter(todos::id.eq(id.as_uuid()))
            .select(TodoRow::as_select())
            .first::<TodoRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| row_to_todo(row).map_err(|err| TodoRepositoryError::query(err.to_string())))
            .transpose()
    }

    async fn save(&self, todo: &Todo) -> Result<(), TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewTodoRow {
            id: *todo.id().as_uuid(),
            text: todo.text().as_str(),
            category: todo.category().as_str(),
            completed: todo.completed(),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
        };

        diesel::insert_into(todos::table)
            .values(&new_row)
            .on_conflict(todos::id)
            .do_update()
            .set(&changeset(todo))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        id: &TodoId,
        mutation: &TodoMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = *id.as_uuid();

        conn.transaction(|conn| lock_and_apply(conn, id, mutation, now).scope_boxed())
            .await
            .map_err(map_diesel_error)
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<bool, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(todos::table.filter(todos::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(map_diesel_error)
    }

    async fn delete_all(&self) -> Result<u64, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(todos::table)
            .execute(&mut conn)
            .await
            .map(count)
            .map_err(map_diesel_error)
    }

    async fn delete_by_category(&self, category: &Category) -> Result<u64, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(todos::table.filter(todos::category.eq(category.as_str())))
            .execute(&mut conn)
            .await
            .map(count)
            .map_err(map_diesel_error)
    }
}
