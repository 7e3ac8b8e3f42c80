//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, Profile};

/// Driving port for reading the profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile, failing with not-found before one is created.
    async fn get(&self) -> Result<Profile, Error>;
}
