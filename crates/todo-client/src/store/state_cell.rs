//! Shared state slot behind every store.
//!
//! A cell owns one state value plus the bookkeeping for its error slot.
//! Every recorded error bumps a generation counter; the auto-clear timer only
//! clears the error it was started for.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;

/// Store state exposing the `loading` flag and `error` slot.
pub(crate) trait StoreState: Clone + Send + 'static {
    fn set_loading(&mut self, loading: bool);
    fn error_mut(&mut self) -> &mut Option<String>;
}

#[derive(Debug)]
struct Tracked<S> {
    state: S,
    error_generation: u64,
}

#[derive(Debug)]
pub(crate) struct StateCell<S> {
    inner: Arc<Mutex<Tracked<S>>>,
    error_ttl: Duration,
}

impl<S> Clone for StateCell<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            error_ttl: self.error_ttl,
        }
    }
}

fn lock<S>(inner: &Mutex<Tracked<S>>) -> MutexGuard<'_, Tracked<S>> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: StoreState> StateCell<S> {
    pub(crate) fn new(state: S, error_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Tracked {
                state,
                error_generation: 0,
            })),
            error_ttl,
        }
    }

    /// Mark a request as in flight and drop any stale error.
    pub(crate) fn begin(&self) {
        let mut tracked = lock(&self.inner);
        tracked.state.set_loading(true);
        *tracked.state.error_mut() = None;
    }

    /// Apply a successful result and clear `loading`.
    pub(crate) fn settle(&self, apply: impl FnOnce(&mut S)) {
        let mut tracked = lock(&self.inner);
        apply(&mut tracked.state);
        tracked.state.set_loading(false);
    }

    /// Record `message` and clear `loading`.
    pub(crate) fn fail(&self, message: impl Into<String>) {
        self.record_error(message);
        lock(&self.inner).state.set_loading(false);
    }

    /// Record `message` without touching `loading`.
    pub(crate) fn record_error(&self, message: impl Into<String>) {
        let text: String = message.into();
        debug!(message = %text, "store error recorded");
        let generation = {
            let mut tracked = lock(&self.inner);
            tracked.error_generation = tracked.error_generation.wrapping_add(1);
            *tracked.state.error_mut() = Some(text);
            tracked.error_generation
        };
        self.schedule_clear(generation);
    }

    fn schedule_clear(&self, generation: u64) {
        // Outside a runtime the error simply stays until cleared by hand.
        let Ok(handle) = Handle::try_current() else {
            return;
        };
        let weak: Weak<Mutex<Tracked<S>>> = Arc::downgrade(&self.inner);
        let ttl = self.error_ttl;
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut tracked = lock(&inner);
            if tracked.error_generation == generation {
                *tracked.state.error_mut() = None;
            }
        });
    }

    pub(crate) fn clear_error(&self) {
        *lock(&self.inner).state.error_mut() = None;
    }

    /// Mutate the state without touching `loading` or `error`.
    pub(crate) fn update(&self, apply: impl FnOnce(&mut S)) {
        apply(&mut lock(&self.inner).state);
    }

    pub(crate) fn read<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&lock(&self.inner).state)
    }

    pub(crate) fn snapshot(&self) -> S {
        self.read(S::clone)
    }
}
