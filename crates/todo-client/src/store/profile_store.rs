//! Client-side cache of the single user profile.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::ProfileApi;
use crate::model::{Profile, ProfileUpdate};

use super::state_cell::{StateCell, StoreState};

/// Snapshot of the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileState {
    /// Loaded profile, `None` until one exists on the server.
    pub profile: Option<Profile>,
    /// Whether a request is in flight.
    pub loading: bool,
    /// Most recent error, cleared automatically after a short delay.
    pub error: Option<String>,
}

impl StoreState for ProfileState {
    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn error_mut(&mut self) -> &mut Option<String> {
        &mut self.error
    }
}

/// Holds the current profile and forwards changes to the backend.
#[derive(Clone)]
pub struct ProfileStore {
    api: Arc<dyn ProfileApi>,
    cell: StateCell<ProfileState>,
}

impl ProfileStore {
    /// Create an empty store backed by `api`.
    #[must_use]
    pub fn new(api: Arc<dyn ProfileApi>) -> Self {
        Self::with_error_ttl(api, super::DEFAULT_ERROR_TTL)
    }

    /// Create an empty store whose errors clear after `error_ttl`.
    #[must_use]
    pub fn with_error_ttl(api: Arc<dyn ProfileApi>, error_ttl: Duration) -> Self {
        Self {
            api,
            cell: StateCell::new(ProfileState::default(), error_ttl),
        }
    }

    /// Load the profile. A missing profile leaves the slot empty.
    pub async fn initialize(&self) {
        self.cell.begin();
        match self.api.get_profile().await {
            Ok(profile) => self.cell.settle(|state| state.profile = Some(profile)),
            Err(err) if err.is_not_found() => {
                debug!("no profile on server yet");
                self.cell.settle(|state| state.profile = None);
            }
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Create the profile with `username`.
    pub async fn create(&self, username: impl Into<String>) {
        self.cell.begin();
        match self.api.create_profile(username.into()).await {
            Ok(profile) => self.cell.settle(|state| state.profile = Some(profile)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Rename the loaded profile. Does nothing when no profile is loaded.
    pub async fn update(&self, username: impl Into<String>) {
        if !self.has_profile() {
            return;
        }
        self.cell.begin();
        let update = ProfileUpdate {
            username: Some(username.into()),
        };
        match self.api.update_profile(update).await {
            Ok(profile) => self.cell.settle(|state| state.profile = Some(profile)),
            Err(err) => self.cell.fail(err.to_string()),
        }
    }

    /// Raise the loaded profile one level. Does nothing when no profile is
    /// loaded and never touches `loading`.
    pub async fn level_up(&self) {
        if !self.has_profile() {
            return;
        }
        match self.api.level_up().await {
            Ok(profile) => {
                debug!(level = profile.level, "profile levelled up");
                self.cell.update(|state| state.profile = Some(profile));
            }
            Err(err) => self.cell.record_error(err.to_string()),
        }
    }

    /// Drop the current error immediately.
    pub fn clear_error(&self) {
        self.cell.clear_error();
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ProfileState {
        self.cell.snapshot()
    }

    /// Currently loaded profile.
    #[must_use]
    pub fn profile(&self) -> Option<Profile> {
        self.cell.read(|state| state.profile.clone())
    }

    fn has_profile(&self) -> bool {
        self.cell.read(|state| state.profile.is_some())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::api::{ApiError, MockProfileApi};

    fn profile(username: &str, level: i64) -> Profile {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        Profile {
            id: Uuid::nil(),
            username: username.to_owned(),
            level,
            created_at: at,
            updated_at: at,
        }
    }

    fn not_found() -> ApiError {
        ApiError::Status {
            status: 404,
            message: "Profile not found".to_owned(),
        }
    }

    async fn loaded(mut api: MockProfileApi, level: i64) -> ProfileStore {
        api.expect_get_profile()
            .times(1)
            .returning(move || Ok(profile("ada", level)));
        let store = ProfileStore::new(Arc::new(api));
        store.initialize().await;
        store
    }

    #[tokio::test]
    async fn initialize_loads_profile() {
        let store = loaded(MockProfileApi::new(), 3).await;

        let state = store.state();
        assert_eq!(state.profile, Some(profile("ada", 3)));
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn initialize_treats_missing_profile_as_empty() {
        let mut api = MockProfileApi::new();
        api.expect_get_profile().returning(|| Err(not_found()));
        let store = ProfileStore::new(Arc::new(api));

        store.initialize().await;

        assert_eq!(store.state(), ProfileState::default());
    }

    #[tokio::test]
    async fn initialize_surfaces_other_failures() {
        let mut api = MockProfileApi::new();
        api.expect_get_profile().returning(|| Err(ApiError::Timeout));
        let store = ProfileStore::new(Arc::new(api));

        store.initialize().await;

        assert_eq!(store.state().error.as_deref(), Some("request timed out"));
    }

    #[tokio::test]
    async fn create_stores_new_profile() {
        let mut api = MockProfileApi::new();
        api.expect_create_profile()
            .withf(|username| username == "grace")
            .times(1)
            .returning(|username| Ok(profile(&username, 1)));
        let store = ProfileStore::new(Arc::new(api));

        store.create("grace").await;

        assert_eq!(store.profile(), Some(profile("grace", 1)));
    }

    #[tokio::test]
    async fn create_conflict_sets_error() {
        let mut api = MockProfileApi::new();
        api.expect_create_profile().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                message: "Profile already exists".to_owned(),
            })
        });
        let store = ProfileStore::new(Arc::new(api));

        store.create("grace").await;

        let state = store.state();
        assert_eq!(state.profile, None);
        assert_eq!(state.error.as_deref(), Some("Profile already exists"));
    }

    #[tokio::test]
    async fn update_and_level_up_skip_without_profile() {
        let mut api = MockProfileApi::new();
        api.expect_update_profile().never();
        api.expect_level_up().never();
        let store = ProfileStore::new(Arc::new(api));

        store.update("nobody").await;
        store.level_up().await;

        assert_eq!(store.state(), ProfileState::default());
    }

    #[tokio::test]
    async fn update_renames_loaded_profile() {
        let mut api = MockProfileApi::new();
        api.expect_update_profile()
            .withf(|update| update.username.as_deref() == Some("lovelace"))
            .times(1)
            .returning(|_| Ok(profile("lovelace", 2)));
        let store = loaded(api, 2).await;

        store.update("lovelace").await;

        assert_eq!(store.profile(), Some(profile("lovelace", 2)));
    }

    #[tokio::test]
    async fn level_up_replaces_profile() {
        let mut api = MockProfileApi::new();
        api.expect_level_up()
            .times(1)
            .returning(|| Ok(profile("ada", 5)));
        let store = loaded(api, 4).await;

        store.level_up().await;

        assert_eq!(store.profile().map(|p| p.level), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn level_up_failure_clears_after_ttl() {
        let mut api = MockProfileApi::new();
        api.expect_level_up().returning(|| {
            Err(ApiError::Transport {
                message: "connection refused".to_owned(),
            })
        });
        let store = loaded(api, 1).await;

        store.level_up().await;
        let state = store.state();
        assert!(!state.loading);
        assert!(state.error.is_some());
        assert_eq!(state.profile.map(|p| p.level), Some(1));

        tokio::time::sleep(super::super::DEFAULT_ERROR_TTL + Duration::from_millis(1)).await;
        assert_eq!(store.state().error, None);
    }
}
