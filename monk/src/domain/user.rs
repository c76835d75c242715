//! User data model.
//!
//! A [`User`] is a registered identity together with its progression stats.
//! The serialised form keeps the camelCase field names of the stored account
//! records so existing snapshots load unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::progression::Progress;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    EmptyDisplayName,
    EmptyCountry,
    InvalidCountry,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::EmptyCountry => write!(f, "country must not be empty"),
            Self::InvalidCountry => {
                write!(f, "country must be a two-letter ISO 3166 code")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Email address used as the unique account key.
///
/// The value is kept exactly as entered. Uniqueness checks compare it byte
/// for byte, so `Ada@example.com` and `ada@example.com` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable display name, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let display_name = display_name.into();
        let trimmed = display_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Two-letter country code, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Validate and construct a [`CountryCode`].
    pub fn new(code: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = code.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyCountry);
        }
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(UserValidationError::InvalidCountry);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CountryCode> for String {
    fn from(value: CountryCode) -> Self {
        value.0
    }
}

impl TryFrom<String> for CountryCode {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Daily screen-time tracking, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenTime {
    /// Target upper bound for daily screen time.
    pub daily_goal_minutes: Option<u32>,
    /// Screen time recorded so far today.
    pub current_minutes: Option<u32>,
}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub email: Email,
    pub display_name: DisplayName,
    pub country: CountryCode,
    pub is_email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub progress: Progress,
    pub screen_time: ScreenTime,
}

/// Registered identity and its progression stats.
///
/// ## Invariants
/// - `level() == experience / 1000 + 1`; the level is derived from
///   [`Progress`] and never stored independently.
/// - Experience, focus minutes, and completed goal counts only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    email: Email,
    display_name: DisplayName,
    country: CountryCode,
    is_email_confirmed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    progress: Progress,
    screen_time: ScreenTime,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            email,
            display_name,
            country,
            is_email_confirmed,
            created_at,
            updated_at,
            progress,
            screen_time,
        } = draft;
        Self {
            id,
            email,
            display_name,
            country,
            is_email_confirmed,
            created_at,
            updated_at,
            progress,
            screen_time,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Account email, the unique lookup key.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name shown to other users.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Country used for local leaderboards.
    pub fn country(&self) -> &CountryCode {
        &self.country
    }

    /// Whether the email address has been confirmed.
    pub fn is_email_confirmed(&self) -> bool {
        self.is_email_confirmed
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Timestamp of the last progression update.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Accumulated progression stats.
    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Current level, derived from experience.
    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    /// Screen-time tracking values.
    pub fn screen_time(&self) -> ScreenTime {
        self.screen_time
    }

    /// Return a copy with new progression stats.
    pub(crate) fn with_progress(&self, progress: Progress) -> Self {
        Self {
            progress,
            ..self.clone()
        }
    }

    /// Return a copy stamped with a new update time.
    pub(crate) fn touched(self, updated_at: DateTime<Utc>) -> Self {
        Self { updated_at, ..self }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    email: String,
    name: String,
    country: String,
    is_email_confirmed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    // Written for readers of the raw record; recomputed from experience on load.
    #[serde(default)]
    level: u32,
    experience: u64,
    total_minutes: u64,
    goals_completed: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    daily_screen_time_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_screen_time: Option<u32>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let level = value.level();
        let User {
            id,
            email,
            display_name,
            country,
            is_email_confirmed,
            created_at,
            updated_at,
            progress,
            screen_time,
        } = value;
        Self {
            id: id.into(),
            email: email.into(),
            name: display_name.into(),
            country: country.into(),
            is_email_confirmed,
            created_at,
            updated_at,
            level,
            experience: progress.experience,
            total_minutes: progress.total_minutes,
            goals_completed: progress.goals_completed,
            daily_screen_time_goal: screen_time.daily_goal_minutes,
            current_screen_time: screen_time.current_minutes,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Ok(Self::new(UserDraft {
            id: UserId::new(value.id)?,
            email: Email::new(value.email)?,
            display_name: DisplayName::new(value.name)?,
            country: CountryCode::new(value.country)?,
            is_email_confirmed: value.is_email_confirmed,
            created_at: value.created_at,
            updated_at: value.updated_at,
            progress: Progress {
                experience: value.experience,
                total_minutes: value.total_minutes,
                goals_completed: value.goals_completed,
            },
            screen_time: ScreenTime {
                daily_goal_minutes: value.daily_screen_time_goal,
                current_minutes: value.current_screen_time,
            },
        }))
    }
}
