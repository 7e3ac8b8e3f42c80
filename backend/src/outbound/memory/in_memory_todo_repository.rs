//! Process-local `TodoRepository` used when no database is configured.
//!
//! Records live in a `tokio::sync::RwLock`; holding the write guard across a
//! read-modify-write gives the same isolation as a row lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{Category, Todo, TodoId, TodoMutation};

/// In-memory todo store preserving insertion order.
#[derive(Debug, Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn count(removed: usize) -> u64 {
    u64::try_from(removed).unwrap_or(u64::MAX)
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all(&self) -> Result<Vec<Todo>, TodoRepositoryError> {
        Ok(self.todos.read().await.clone())
    }

    async fn find_by_id(&self, id: &TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|todo| todo.id() == *id).cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<(), TodoRepositoryError> {
        let mut todos = self.todos.write().await;
        match todos.iter_mut().find(|stored| stored.id() == todo.id()) {
            Some(stored) => *stored = todo.clone(),
            None => todos.push(todo.clone()),
        }
        Ok(())
    }

    async fn update(
        &self,
        id: &TodoId,
        mutation: &TodoMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut todos = self.todos.write().await;
        Ok(todos
            .iter_mut()
            .find(|todo| todo.id() == *id)
            .map(|todo| {
                todo.apply(mutation, now);
                todo.clone()
            }))
    }

    async fn delete_by_id(&self, id: &TodoId) -> Result<bool, TodoRepositoryError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.id() != *id);
        Ok(todos.len() != before)
    }

    async fn delete_all(&self) -> Result<u64, TodoRepositoryError> {
        let mut todos = self.todos.write().await;
        let removed = todos.len();
        todos.clear();
        Ok(count(removed))
    }

    async fn delete_by_category(&self, category: &Category) -> Result<u64, TodoRepositoryError> {
        let mut todos = self.todos.write().await;
        let before = todos.len();
        todos.retain(|todo| todo.category() != category);
        Ok(count(before.saturating_sub(todos.len())))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::TodoText;
    use crate::test_support::fixture_timestamp;

    fn todo(text: &str, category: &str) -> Todo {
        Todo::create(
            TodoText::new(text).expect("valid text"),
            Category::new(category).expect("valid category"),
            fixture_timestamp(),
        )
    }

    #[fixture]
    fn repo() -> InMemoryTodoRepository {
        InMemoryTodoRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn save_then_find_by_id_returns_same_todo(repo: InMemoryTodoRepository) {
        let todo = todo("buy milk", "shopping");
        repo.save(&todo).await.expect("save succeeds");

        let found = repo.find_by_id(&todo.id()).await.expect("lookup succeeds");
        assert_eq!(found, Some(todo));
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_keeps_insertion_order(repo: InMemoryTodoRepository) {
        let first = todo("first", "work");
        let second = todo("second", "work");
        repo.save(&first).await.expect("save first");
        repo.save(&second).await.expect("save second");

        let ids: Vec<_> = repo
            .find_all()
            .await
            .expect("list succeeds")
            .iter()
            .map(Todo::id)
            .collect();
        assert_eq!(ids, vec![first.id(), second.id()]);
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_mutation_in_place(repo: InMemoryTodoRepository) {
        let todo = todo("file taxes", "work");
        repo.save(&todo).await.expect("save succeeds");
        let later = fixture_timestamp() + Duration::minutes(5);

        let updated = repo
            .update(&todo.id(), &TodoMutation::Complete, later)
            .await
            .expect("update succeeds")
            .expect("todo exists");
        assert!(updated.completed());
        assert_eq!(updated.updated_at(), later);

        let stored = repo
            .find_by_id(&todo.id())
            .await
            .expect("lookup succeeds")
            .expect("todo exists");
        assert_eq!(stored, updated);
    }

    #[rstest]
    #[tokio::test]
    async fn update_unknown_id_returns_none(repo: InMemoryTodoRepository) {
        let result = repo
            .update(&TodoId::random(), &TodoMutation::Complete, fixture_timestamp())
            .await
            .expect("update succeeds");
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_category_only_removes_matching(repo: InMemoryTodoRepository) {
        let work = todo("report", "work");
        let personal = todo("gym", "personal");
        repo.save(&work).await.expect("save work");
        repo.save(&personal).await.expect("save personal");

        let removed = repo
            .delete_by_category(&Category::new("work").expect("valid category"))
            .await
            .expect("delete succeeds");

        assert_eq!(removed, 1);
        let remaining = repo.find_all().await.expect("list succeeds");
        assert_eq!(remaining, vec![personal]);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_id_reports_whether_removed(repo: InMemoryTodoRepository) {
        let todo = todo("walk dog", "personal");
        repo.save(&todo).await.expect("save succeeds");

        assert!(repo.delete_by_id(&todo.id()).await.expect("first delete"));
        assert!(!repo.delete_by_id(&todo.id()).await.expect("second delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_all_empties_store(repo: InMemoryTodoRepository) {
        repo.save(&todo("a", "work")).await.expect("save a");
        repo.save(&todo("b", "home")).await.expect("save b");

        assert_eq!(repo.delete_all().await.expect("delete all"), 2);
        assert!(repo.find_all().await.expect("list").is_empty());
    }
}
