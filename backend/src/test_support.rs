//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and, through the `test-support` feature,
//! by the integration suites in `tests/`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{ProfileService, TodoService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryProfileRepository, InMemoryTodoRepository};

/// Fixed instant used as "now" throughout the test suites.
///
/// # Panics
/// Never in practice; the literal date is valid.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("fixture timestamp must be unambiguous"),
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// HTTP state wired to fresh in-memory repositories and the given clock.
pub fn in_memory_http_state(clock: Arc<dyn Clock>) -> HttpState {
    let todos = Arc::new(TodoService::new(
        Arc::new(InMemoryTodoRepository::new()),
        clock.clone(),
    ));
    let profile = Arc::new(ProfileService::new(
        Arc::new(InMemoryProfileRepository::new()),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        todos: todos.clone(),
        todos_query: todos,
        profile: profile.clone(),
        profile_query: profile,
    })
}
