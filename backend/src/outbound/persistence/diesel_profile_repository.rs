//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    Level, Profile, ProfileDraft, ProfileId, ProfileMutation, ProfileValidationError, Username,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewProfileRow, ProfileRow, ProfileUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the profile repository port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    map_basic_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> ProfileRepositoryError {
    map_basic_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Failure inside the locked read-modify-write transaction.
#[derive(Debug, thiserror::Error)]
enum ApplyError {
    #[error(transparent)]
    Diesel(#[from] DieselError),
    #[error(transparent)]
    Rejected(#[from] ProfileValidationError),
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileValidationError> {
    let ProfileRow {
        id,
        username,
        level,
        created_at,
        updated_at,
    } = row;

    Ok(Profile::restore(ProfileDraft {
        id: ProfileId::from_uuid(id),
        username: Username::new(username)?,
        level: Level::try_from(level)?,
        created_at,
        updated_at,
    }))
}

async fn lock_and_apply(
    conn: &mut AsyncPgConnection,
    mutation: &ProfileMutation,
    now: DateTime<Utc>,
) -> Result<Option<Profile>, ApplyError> {
    let row = profiles::table
        .select(ProfileRow::as_select())
        .for_update()
        .first::<ProfileRow>(conn)
        .await
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };
    let mut profile =
        row_to_profile(row).map_err(|err| DieselError::DeserializationError(Box::new(err)))?;

    if profile.apply(mutation, now)? {
        diesel::update(profiles::table.filter(profiles::id.eq(profile.id().as_uuid())))
            .set(&ProfileUpdate {
                username: profile.username().as_str(),
                level: i64::from(profile.level()),
                updated_at: profile.updated_at(),
            })
            .execute(conn)
            .await?;
    }
    Ok(Some(profile))
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn find_current(&self) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = profiles::table
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            row_to_profile(row).map_err(|err| ProfileRepositoryError::query(err.to_string()))
        })
        .transpose()
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewProfileRow {
            id: *profile.id().as_uuid(),
            username: profile.username().as_str(),
            level: i64::from(profile.level()),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
        };

        // The unique singleton column turns a second insert into a no-op.
        let inserted = diesel::insert_into(profiles::table)
            .values(&new_row)
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if inserted == 0 {
            return Err(ProfileRepositoryError::already_exists());
        }
        Ok(())
    }

    async fn update(
        &self,
        mutation: &ProfileMutation,
        now: DateTime<Utc>,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction(|conn| lock_and_apply(conn, mutation, now).scope_boxed())
            .await
            .map_err(|err| match err {
                ApplyError::Diesel(error) => map_diesel_error(error),
                ApplyError::Rejected(_) => ProfileRepositoryError::level_at_maximum(),
            })
    }
}
