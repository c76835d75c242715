//! Focus activities and custom session lengths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Shortest custom session, in minutes.
pub const FOCUS_MINUTES_MIN: u32 = 1;
/// Longest custom session, in minutes.
pub const FOCUS_MINUTES_MAX: u32 = 120;
/// Quick-pick durations offered alongside free entry.
pub const DURATION_PRESETS: [u32; 6] = [5, 15, 25, 45, 60, 90];

/// Kind of session being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Work,
    Study,
    Exercise,
    Break,
}

impl Activity {
    /// All activities in menu order.
    pub const ALL: [Self; 4] = [Self::Work, Self::Study, Self::Exercise, Self::Break];

    /// Default session length for the activity.
    pub fn default_duration(self) -> FocusDuration {
        let minutes = match self {
            Self::Work => 25,
            Self::Study => 30,
            Self::Exercise => 15,
            Self::Break => 5,
        };
        FocusDuration(minutes)
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Study => "study",
            Self::Exercise => "exercise",
            Self::Break => "break",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for unknown activity names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActivity(pub String);

impl fmt::Display for UnknownActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown activity {:?}; expected work, study, exercise, or break",
            self.0
        )
    }
}

impl std::error::Error for UnknownActivity {}

impl FromStr for Activity {
    type Err = UnknownActivity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|activity| activity.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownActivity(value.to_owned()))
    }
}

/// Validation error for [`FocusDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationOutOfRange {
    pub minutes: u32,
}

impl fmt::Display for DurationOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "session length must be between {FOCUS_MINUTES_MIN} and {FOCUS_MINUTES_MAX} minutes (got {})",
            self.minutes
        )
    }
}

impl std::error::Error for DurationOutOfRange {}

/// Session length in whole minutes, between 1 and 120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FocusDuration(u32);

impl FocusDuration {
    /// Validate a custom length.
    pub fn new(minutes: u32) -> Result<Self, DurationOutOfRange> {
        if (FOCUS_MINUTES_MIN..=FOCUS_MINUTES_MAX).contains(&minutes) {
            Ok(Self(minutes))
        } else {
            Err(DurationOutOfRange { minutes })
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn seconds(self) -> u32 {
        self.0 * 60
    }
}
