//! Process-local `ProfileRepository` used when no database is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileMutation};

/// In-memory holder for the singleton profile.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profile: RwLock<Option<Profile>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_current(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.profile.read().await.clone())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut slot = self.profile.write().await;
        if slot.is_some() {
            return Err(ProfileRepositoryError::already_exists());
        }
        *slot = Some(profile.clone());
        Ok(())
    }

    async fn update(
        &self,
        mutation: &ProfileMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut slot = self.profile.write().await;
        let Some(profile) = slot.as_mut() else {
            return Ok(None);
        };
        profile
            .apply(mutation, now)
            .map_err(|_| ProfileRepositoryError::level_at_maximum())?;
        Ok(Some(profile.clone()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{Level, ProfileDraft, ProfileId, Username};
    use crate::test_support::fixture_timestamp;

    fn profile(name: &str) -> Profile {
        Profile::create(
            Username::new(name).expect("valid username"),
            fixture_timestamp(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn second_insert_is_rejected() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(&profile("ada")).await.expect("first insert");

        let err = repo
            .insert(&profile("grace"))
            .await
            .expect_err("second insert rejected");
        assert_eq!(err, ProfileRepositoryError::AlreadyExists);

        let stored = repo.find_current().await.expect("lookup").expect("profile");
        assert_eq!(stored.username().as_str(), "ada");
    }

    #[rstest]
    #[tokio::test]
    async fn update_without_profile_returns_none() {
        let repo = InMemoryProfileRepository::new();
        let result = repo
            .update(&ProfileMutation::LevelUp, fixture_timestamp())
            .await
            .expect("update succeeds");
        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn level_up_is_persisted() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(&profile("ada")).await.expect("insert");

        repo.update(&ProfileMutation::LevelUp, fixture_timestamp())
            .await
            .expect("level up");
        let stored = repo.find_current().await.expect("lookup").expect("profile");
        assert_eq!(stored.level().value(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn level_up_at_maximum_is_rejected_and_kept() {
        let repo = InMemoryProfileRepository::new();
        let top = Profile::restore(ProfileDraft {
            id: ProfileId::random(),
            username: Username::new("ada").expect("valid username"),
            level: Level::MAX,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        });
        repo.insert(&top).await.expect("insert");

        let err = repo
            .update(&ProfileMutation::LevelUp, fixture_timestamp())
            .await
            .expect_err("level cannot grow");

        assert_eq!(err, ProfileRepositoryError::LevelAtMaximum);
        let stored = repo.find_current().await.expect("lookup").expect("profile");
        assert_eq!(stored, top);
    }
}
