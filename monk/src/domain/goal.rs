//! Goals owned by a user.
//!
//! A goal starts open and can be completed exactly once; the completion
//! timestamp is set on that transition and never cleared.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Validation errors returned by goal constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    InvalidId,
    EmptyTitle,
    UnknownKind { value: String },
    CompletedWithoutTimestamp,
    TimestampWithoutCompletion,
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "goal id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "goal title must not be empty"),
            Self::UnknownKind { value } => {
                write!(f, "goal type must be short, medium, or long (got {value})")
            }
            Self::CompletedWithoutTimestamp => {
                write!(f, "completed goals must carry a completion time")
            }
            Self::TimestampWithoutCompletion => {
                write!(f, "open goals must not carry a completion time")
            }
        }
    }
}

impl std::error::Error for GoalValidationError {}

/// Stable goal identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    /// Parse a [`GoalId`] from its hyphenated form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, GoalValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| GoalValidationError::InvalidId)
    }

    /// Generate a new random [`GoalId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Goal title, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoalTitle(String);

impl GoalTitle {
    /// Validate and construct a [`GoalTitle`].
    pub fn new(title: impl AsRef<str>) -> Result<Self, GoalValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for GoalTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GoalTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<GoalTitle> for String {
    fn from(value: GoalTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for GoalTitle {
    type Error = GoalValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Time horizon of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Short,
    Medium,
    Long,
}

impl GoalKind {
    /// All kinds in display order.
    pub const ALL: [Self; 3] = [Self::Short, Self::Medium, Self::Long];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalKind {
    type Err = GoalValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(GoalValidationError::UnknownKind {
                value: value.to_owned(),
            }),
        }
    }
}

/// Whether a goal is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Open,
    Completed { at: DateTime<Utc> },
}

/// A goal owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GoalDto", into = "GoalDto")]
pub struct Goal {
    id: GoalId,
    owner: UserId,
    title: GoalTitle,
    kind: GoalKind,
    created_at: DateTime<Utc>,
    status: GoalStatus,
}

impl Goal {
    /// Create an open goal.
    pub fn open(
        id: GoalId,
        owner: UserId,
        title: GoalTitle,
        kind: GoalKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            title,
            kind,
            created_at,
            status: GoalStatus::Open,
        }
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &GoalTitle {
        &self.title
    }

    pub fn kind(&self) -> GoalKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> GoalStatus {
        self.status
    }

    /// `true` once the goal has been completed.
    pub fn is_completed(&self) -> bool {
        matches!(self.status, GoalStatus::Completed { .. })
    }

    /// Completion timestamp, if completed.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            GoalStatus::Open => None,
            GoalStatus::Completed { at } => Some(at),
        }
    }

    /// Complete an open goal.
    ///
    /// Returns `None` when the goal was already completed, leaving the
    /// original completion time in place.
    pub fn complete(&self, at: DateTime<Utc>) -> Option<Self> {
        if self.is_completed() {
            return None;
        }
        Some(Self {
            status: GoalStatus::Completed { at },
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalDto {
    id: GoalId,
    user_id: UserId,
    title: String,
    #[serde(rename = "type")]
    kind: GoalKind,
    completed: bool,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

impl From<Goal> for GoalDto {
    fn from(value: Goal) -> Self {
        let completed_at = value.completed_at();
        Self {
            id: value.id,
            user_id: value.owner,
            title: value.title.into(),
            kind: value.kind,
            completed: completed_at.is_some(),
            created_at: value.created_at,
            completed_at,
        }
    }
}

impl TryFrom<GoalDto> for Goal {
    type Error = GoalValidationError;

    fn try_from(value: GoalDto) -> Result<Self, Self::Error> {
        let status = match (value.completed, value.completed_at) {
            (true, Some(at)) => GoalStatus::Completed { at },
            (false, None) => GoalStatus::Open,
            (true, None) => return Err(GoalValidationError::CompletedWithoutTimestamp),
            (false, Some(_)) => return Err(GoalValidationError::TimestampWithoutCompletion),
        };
        Ok(Self {
            id: value.id,
            owner: value.user_id,
            title: GoalTitle::new(value.title)?,
            kind: value.kind,
            created_at: value.created_at,
            status,
        })
    }
}

/// Goal titles supplied at registration, grouped by horizon.
///
/// Blank entries are allowed here and skipped when the ledger is seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalSeed {
    pub short: Vec<String>,
    pub medium: Vec<String>,
    pub long: Vec<String>,
}

impl GoalSeed {
    /// Valid titles paired with their kind, in short/medium/long order.
    pub fn titles(&self) -> impl Iterator<Item = (GoalKind, GoalTitle)> + '_ {
        GoalKind::ALL.into_iter().flat_map(move |kind| {
            self.bucket(kind)
                .iter()
                .filter_map(move |raw| GoalTitle::new(raw).ok().map(|title| (kind, title)))
        })
    }

    /// `true` when at least one title is non-blank.
    pub fn has_any_title(&self) -> bool {
        self.titles().next().is_some()
    }

    fn bucket(&self, kind: GoalKind) -> &[String] {
        match kind {
            GoalKind::Short => &self.short,
            GoalKind::Medium => &self.medium,
            GoalKind::Long => &self.long,
        }
    }
}

/// Per-kind totals for a user's goals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub total: usize,
    pub completed: usize,
    pub short: usize,
    pub medium: usize,
    pub long: usize,
}

impl GoalSummary {
    /// Tally the given goals.
    pub fn from_goals<'a>(goals: impl IntoIterator<Item = &'a Goal>) -> Self {
        goals.into_iter().fold(Self::default(), |mut summary, goal| {
            summary.total += 1;
            if goal.is_completed() {
                summary.completed += 1;
            }
            match goal.kind() {
                GoalKind::Short => summary.short += 1,
                GoalKind::Medium => summary.medium += 1,
                GoalKind::Long => summary.long += 1,
            }
            summary
        })
    }
}

#[cfg(test)]
mod tests;
