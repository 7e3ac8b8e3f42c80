//! Profile domain service.
//!
//! Implements the profile driving ports over a [`ProfileRepository`]. The
//! level-up operation is unconditional; callers decide when a level is earned.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateProfileRequest, ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError,
    UpdateProfileRequest,
};
use crate::domain::{Error, Profile, ProfileMutation, ProfileValidationError, Username};
use crate::domain::timestamp::stored_now;

fn map_repository_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::AlreadyExists => profile_exists(),
        ProfileRepositoryError::LevelAtMaximum => {
            Error::conflict("profile level is already at its maximum").with_details(json!({
                "code": "level_at_maximum",
            }))
        }
    }
}

fn profile_exists() -> Error {
    Error::conflict("profile already exists").with_details(json!({
        "code": "profile_exists",
    }))
}

fn profile_not_found() -> Error {
    Error::not_found("profile not found").with_details(json!({
        "code": "profile_not_found",
    }))
}

fn parse_username(raw: String) -> Result<Username, Error> {
    Username::new(raw).map_err(|err| {
        let code = match err {
            ProfileValidationError::UsernameTooLong { .. } => "too_long",
            ProfileValidationError::EmptyUsername
            | ProfileValidationError::InvalidLevel { .. }
            | ProfileValidationError::LevelAtMaximum => "blank",
        };
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "username",
            "code": code,
        }))
    })
}

/// Profile service implementing [`ProfileQuery`] and [`ProfileCommand`].
#[derive(Clone)]
pub struct ProfileService<R> {
    profile_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ProfileService<R> {
    /// Create a new service over the profile repository and clock.
    pub fn new(profile_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profile_repo,
            clock,
        }
    }
}

impl<R> ProfileService<R>
where
    R: ProfileRepository,
{
    async fn mutate(&self, mutation: ProfileMutation) -> Result<Profile, Error> {
        let now = stored_now(self.clock.as_ref());
        self.profile_repo
            .update(&mutation, now)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(profile_not_found)
    }
}

#[async_trait]
impl<R> ProfileQuery for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn get(&self) -> Result<Profile, Error> {
        let profile = self
            .profile_repo
            .find_current()
            .await
            .map_err(map_repository_error)?
            .ok_or_else(profile_not_found)?;
        debug!(profile_id = %profile.id(), "loaded profile");
        Ok(profile)
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn create(&self, request: CreateProfileRequest) -> Result<Profile, Error> {
        let username = parse_username(request.username)?;
        let profile = Profile::create(username, stored_now(self.clock.as_ref()));

        self.profile_repo
            .insert(&profile)
            .await
            .map_err(map_repository_error)?;

        info!(profile_id = %profile.id(), "profile created");
        Ok(profile)
    }

    async fn update(&self, request: UpdateProfileRequest) -> Result<Profile, Error> {
        match request.username {
            Some(raw) => {
                let username = parse_username(raw)?;
                let profile = self.mutate(ProfileMutation::Rename(username)).await?;
                info!(profile_id = %profile.id(), "profile renamed");
                Ok(profile)
            }
            None => self.get().await,
        }
    }

    async fn level_up(&self) -> Result<Profile, Error> {
        let profile = self.mutate(ProfileMutation::LevelUp).await?;
        info!(
            profile_id = %profile.id(),
            level = profile.level().value(),
            "profile levelled up"
        );
        Ok(profile)
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
