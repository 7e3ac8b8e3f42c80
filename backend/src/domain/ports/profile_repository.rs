//! Driven port for the singleton profile record.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Profile, ProfileMutation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// A profile already exists.
        AlreadyExists =>
            "profile already exists",
        /// The stored level cannot grow any further.
        LevelAtMaximum =>
            "profile level is already at its maximum",
    }
}

/// Port for storing the one profile of a deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Load the profile, if one has been created.
    async fn find_current(&self) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Store a new profile.
    ///
    /// Fails with [`ProfileRepositoryError::AlreadyExists`] when a profile is
    /// already stored.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Apply `mutation` to the stored profile inside one transaction.
    ///
    /// Returns `None` when no profile exists.
    async fn update(
        &self,
        mutation: &ProfileMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
