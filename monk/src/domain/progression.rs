//! Progression rules: experience, levels, and monk ranks.
//!
//! These functions are pure. Persisting the result is the job of
//! [`crate::domain::ProgressionService`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::User;

/// Experience awarded per focused minute.
pub const EXPERIENCE_PER_MINUTE: u64 = 10;
/// Experience awarded for completing a goal.
pub const GOAL_COMPLETION_BONUS: u64 = 500;
/// Experience required to advance one level.
pub const EXPERIENCE_PER_LEVEL: u64 = 1000;

/// Accumulated activity for a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Total experience earned.
    pub experience: u64,
    /// Total minutes spent in completed focus sessions.
    pub total_minutes: u64,
    /// Number of goals completed.
    pub goals_completed: u32,
}

impl Progress {
    /// Level implied by the current experience, starting at 1.
    pub fn level(&self) -> u32 {
        level_for(self.experience)
    }

    /// Add a finished focus session of `minutes`.
    pub fn with_focus_minutes(self, minutes: u32) -> Self {
        let minutes = u64::from(minutes);
        Self {
            experience: self
                .experience
                .saturating_add(minutes.saturating_mul(EXPERIENCE_PER_MINUTE)),
            total_minutes: self.total_minutes.saturating_add(minutes),
            goals_completed: self.goals_completed,
        }
    }

    /// Add one completed goal.
    pub fn with_goal_completed(self) -> Self {
        Self {
            experience: self.experience.saturating_add(GOAL_COMPLETION_BONUS),
            total_minutes: self.total_minutes,
            goals_completed: self.goals_completed.saturating_add(1),
        }
    }
}

/// Map an experience total to a level: `experience / 1000 + 1`.
///
/// # Examples
/// ```
/// use monk::domain::level_for;
///
/// assert_eq!(level_for(0), 1);
/// assert_eq!(level_for(999), 1);
/// assert_eq!(level_for(1000), 2);
/// ```
pub fn level_for(experience: u64) -> u32 {
    let level = (experience / EXPERIENCE_PER_LEVEL).saturating_add(1);
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// Apply a completed focus session to `user`.
pub fn apply_focus_minutes(user: &User, minutes: u32) -> User {
    user.with_progress(user.progress().with_focus_minutes(minutes))
}

/// Apply a completed goal to `user`.
pub fn apply_goal_completion(user: &User) -> User {
    user.with_progress(user.progress().with_goal_completed())
}

/// Rank tier shown alongside a user's level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonkRank {
    Novice,
    Disciple,
    Adept,
    Master,
    Enlightened,
}

impl MonkRank {
    /// Tier reached at `level`.
    pub fn for_level(level: u32) -> Self {
        match level {
            0..=4 => Self::Novice,
            5..=9 => Self::Disciple,
            10..=14 => Self::Adept,
            15..=19 => Self::Master,
            _ => Self::Enlightened,
        }
    }

    /// Short label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Novice => "Novice Monk",
            Self::Disciple => "Disciple",
            Self::Adept => "Adept",
            Self::Master => "Master",
            Self::Enlightened => "Enlightened One",
        }
    }
}

impl fmt::Display for MonkRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(999, 1)]
    #[case(1000, 2)]
    #[case(1450, 2)]
    #[case(20_000, 21)]
    fn level_follows_experience(#[case] experience: u64, #[case] expected: u32) {
        assert_eq!(level_for(experience), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(25)]
    #[case(100)]
    fn focus_minutes_award_ten_experience_each(#[case] minutes: u32) {
        let user = sample_user(Progress {
            experience: 370,
            total_minutes: 12,
            goals_completed: 1,
        });

        let updated = apply_focus_minutes(&user, minutes);

        let progress = updated.progress();
        assert_eq!(progress.experience, 370 + 10 * u64::from(minutes));
        assert_eq!(progress.total_minutes, 12 + u64::from(minutes));
        assert_eq!(progress.goals_completed, 1);
        assert_eq!(updated.level(), level_for(progress.experience));
    }

    #[rstest]
    fn hundred_minutes_from_zero_reaches_level_two() {
        let user = sample_user(Progress::default());

        let updated = apply_focus_minutes(&user, 100);

        assert_eq!(updated.progress().experience, 1000);
        assert_eq!(updated.level(), 2);
    }

    #[rstest]
    fn goal_completion_adds_bonus_and_count() {
        let user = sample_user(Progress {
            experience: 950,
            total_minutes: 0,
            goals_completed: 3,
        });

        let updated = apply_goal_completion(&user);

        assert_eq!(updated.progress().experience, 1450);
        assert_eq!(updated.progress().goals_completed, 4);
        assert_eq!(updated.level(), 2);
    }

    #[rstest]
    fn progression_saturates_instead_of_overflowing() {
        let user = sample_user(Progress {
            experience: u64::MAX - 5,
            total_minutes: u64::MAX,
            goals_completed: u32::MAX,
        });

        let updated = apply_goal_completion(&apply_focus_minutes(&user, u32::MAX));

        assert_eq!(updated.progress().experience, u64::MAX);
        assert_eq!(updated.progress().total_minutes, u64::MAX);
        assert_eq!(updated.progress().goals_completed, u32::MAX);
    }

    #[rstest]
    #[case(1, MonkRank::Novice)]
    #[case(4, MonkRank::Novice)]
    #[case(5, MonkRank::Disciple)]
    #[case(9, MonkRank::Disciple)]
    #[case(10, MonkRank::Adept)]
    #[case(15, MonkRank::Master)]
    #[case(19, MonkRank::Master)]
    #[case(20, MonkRank::Enlightened)]
    #[case(99, MonkRank::Enlightened)]
    fn rank_tiers_follow_level(#[case] level: u32, #[case] expected: MonkRank) {
        assert_eq!(MonkRank::for_level(level), expected);
    }
}
