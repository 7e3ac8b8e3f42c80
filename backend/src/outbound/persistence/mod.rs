//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types; rows are revalidated through the domain constructors on load.
//! Connections come from a `bb8` pool driven by `diesel-async`.
//!
//! # Example
//!
//! ```ignore
//! use todo_backend::outbound::persistence::{DbPool, DieselTodoRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todo")).await?;
//! let repo = DieselTodoRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_profile_repository;
mod diesel_todo_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_todo_repository::DieselTodoRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
