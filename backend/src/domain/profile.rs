//! Player profile aggregate backing the level-up side feature.
//!
//! At most one profile exists per deployment. Its level starts at
//! [`Level::INITIAL`] and grows by one each time a todo is completed.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum username length in characters.
pub const USERNAME_MAX: usize = 50;

/// Validation errors returned by profile value object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    InvalidLevel { value: i64 },
    LevelAtMaximum,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be blank"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::InvalidLevel { value } => write!(f, "level {value} is out of range"),
            Self::LevelAtMaximum => write!(f, "level is already at its maximum"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Stable profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileId(Uuid);

impl ProfileId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated username: non-blank, at most [`USERNAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    pub fn new(username: impl Into<String>) -> Result<Self, ProfileValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(ProfileValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(ProfileValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Player level, between one and [`Level::MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(i64);

impl Level {
    /// Level assigned to a newly created profile.
    pub const INITIAL: Self = Self(1);

    /// Highest level a `BIGINT` column can hold.
    pub const MAX: Self = Self(i64::MAX);

    /// Access the numeric level.
    pub fn value(self) -> i64 {
        self.0
    }

    /// The following level.
    ///
    /// # Errors
    /// [`ProfileValidationError::LevelAtMaximum`] when `self` is [`Level::MAX`].
    pub fn next(self) -> Result<Self, ProfileValidationError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(ProfileValidationError::LevelAtMaximum)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl TryFrom<i64> for Level {
    type Error = ProfileValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(ProfileValidationError::InvalidLevel { value })
        }
    }
}

impl From<Level> for i64 {
    fn from(value: Level) -> Self {
        value.0
    }
}

/// Named state change applied to the stored profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileMutation {
    /// Change the username.
    Rename(Username),
    /// Raise the level by one.
    LevelUp,
}

/// Field bundle used to rebuild a profile from storage.
#[derive(Debug, Clone)]
pub struct ProfileDraft {
    pub id: ProfileId,
    pub username: Username,
    pub level: Level,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The player profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    username: Username,
    level: Level,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a level-one profile.
    pub fn create(username: Username, now: DateTime<Utc>) -> Self {
        Self {
            id: ProfileId::random(),
            username,
            level: Level::INITIAL,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a profile from persisted fields.
    pub fn restore(draft: ProfileDraft) -> Self {
        let ProfileDraft {
            id,
            username,
            level,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            username,
            level,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Change the username. Returns `false` when it is unchanged.
    pub fn rename(&mut self, username: Username, now: DateTime<Utc>) -> bool {
        if self.username == username {
            return false;
        }
        self.username = username;
        self.touch(now);
        true
    }

    /// Raise the level by exactly one.
    ///
    /// # Errors
    /// [`ProfileValidationError::LevelAtMaximum`] leaves the profile untouched.
    pub fn level_up(&mut self, now: DateTime<Utc>) -> Result<(), ProfileValidationError> {
        self.level = self.level.next()?;
        self.touch(now);
        Ok(())
    }

    /// Apply a [`ProfileMutation`], returning whether the profile changed.
    ///
    /// # Errors
    /// Propagates [`Profile::level_up`] failures.
    pub fn apply(
        &mut self,
        mutation: &ProfileMutation,
        now: DateTime<Utc>,
    ) -> Result<bool, ProfileValidationError> {
        match mutation {
            ProfileMutation::Rename(username) => Ok(self.rename(username.clone(), now)),
            ProfileMutation::LevelUp => self.level_up(now).map(|()| true),
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[fixture]
    fn profile(now: DateTime<Utc>) -> Profile {
        Profile::create(Username::new("ada").expect("valid username"), now)
    }

    #[rstest]
    fn create_starts_at_level_one(profile: Profile) {
        assert_eq!(profile.level(), Level::INITIAL);
        assert_eq!(profile.level().value(), 1);
        assert_eq!(profile.created_at(), profile.updated_at());
    }

    #[rstest]
    fn level_up_increments_by_one_and_bumps(mut profile: Profile, now: DateTime<Utc>) {
        let later = now + Duration::seconds(30);
        profile.level_up(later).expect("level up");
        profile.level_up(later).expect("level up");

        assert_eq!(profile.level().value(), 3);
        assert_eq!(profile.updated_at(), later);
    }

    #[rstest]
    fn rename_to_same_username_is_noop(mut profile: Profile, now: DateTime<Utc>) {
        let changed = profile.apply(
            &ProfileMutation::Rename(Username::new("ada").expect("valid username")),
            now + Duration::minutes(1),
        );
        assert_eq!(changed, Ok(false));
        assert_eq!(profile.updated_at(), now);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn username_rejects_blank(#[case] raw: &str) {
        assert_eq!(
            Username::new(raw),
            Err(ProfileValidationError::EmptyUsername)
        );
    }

    #[rstest]
    fn username_rejects_overlong() {
        assert_eq!(
            Username::new("u".repeat(USERNAME_MAX + 1)),
            Err(ProfileValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    #[case(i64::MIN)]
    fn level_rejects_out_of_range_values(#[case] value: i64) {
        assert_eq!(
            Level::try_from(value),
            Err(ProfileValidationError::InvalidLevel { value })
        );
    }

    #[rstest]
    fn level_grows_past_u32_range() {
        let level = Level::try_from(i64::from(u32::MAX)).expect("valid level");
        assert_eq!(
            level.next().map(Level::value),
            Ok(i64::from(u32::MAX) + 1)
        );
    }

    #[rstest]
    fn level_up_at_maximum_is_an_error(mut profile: Profile, now: DateTime<Utc>) {
        profile = Profile::restore(ProfileDraft {
            id: profile.id(),
            username: profile.username().clone(),
            level: Level::MAX,
            created_at: now,
            updated_at: now,
        });

        let result = profile.apply(&ProfileMutation::LevelUp, now + Duration::minutes(1));

        assert_eq!(result, Err(ProfileValidationError::LevelAtMaximum));
        assert_eq!(profile.level(), Level::MAX);
        assert_eq!(profile.updated_at(), now);
    }
}
