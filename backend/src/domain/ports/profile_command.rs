//! Driving port for profile mutations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Profile};

/// Request to create the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    pub username: String,
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
}

/// Driving port for profile write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create the profile at level one. Conflicts when one exists.
    async fn create(&self, request: CreateProfileRequest) -> Result<Profile, Error>;

    /// Apply a partial update to the existing profile.
    async fn update(&self, request: UpdateProfileRequest) -> Result<Profile, Error>;

    /// Raise the profile level by exactly one.
    async fn level_up(&self) -> Result<Profile, Error>;
}
