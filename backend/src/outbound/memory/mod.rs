//! In-process repository adapters.
//!
//! Used when the server starts without a database URL, and by tests that
//! exercise full request flows without PostgreSQL.

mod in_memory_profile_repository;
mod in_memory_todo_repository;

pub use in_memory_profile_repository::InMemoryProfileRepository;
pub use in_memory_todo_repository::InMemoryTodoRepository;
