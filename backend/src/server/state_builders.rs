//! Builders wiring repositories and services into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use todo_backend::domain::ports::{ProfileRepository, TodoRepository};
use todo_backend::domain::{ProfileService, TodoService};
use todo_backend::inbound::http::state::{HttpState, HttpStatePorts};
use todo_backend::outbound::memory::{InMemoryProfileRepository, InMemoryTodoRepository};
use todo_backend::outbound::persistence::{DieselProfileRepository, DieselTodoRepository};

use super::ServerConfig;

fn ports_from<T, P>(todo_repo: T, profile_repo: P, clock: Arc<dyn Clock>) -> HttpStatePorts
where
    T: TodoRepository + 'static,
    P: ProfileRepository + 'static,
{
    let todos = Arc::new(TodoService::new(Arc::new(todo_repo), clock.clone()));
    let profile = Arc::new(ProfileService::new(Arc::new(profile_repo), clock));
    HttpStatePorts {
        todos: todos.clone(),
        todos_query: todos,
        profile: profile.clone(),
        profile_query: profile,
    }
}

/// Build the HTTP state, using PostgreSQL repositories when a pool is
/// configured and process-local ones otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let ports = match config.db_pool() {
        Some(pool) => ports_from(
            DieselTodoRepository::new(pool.clone()),
            DieselProfileRepository::new(pool.clone()),
            clock,
        ),
        None => {
            warn!("no database configured; todos and profile are kept in memory");
            ports_from(
                InMemoryTodoRepository::new(),
                InMemoryProfileRepository::new(),
                clock,
            )
        }
    };
    web::Data::new(HttpState::new(ports))
}
