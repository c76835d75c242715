//! Shared helpers for unit tests. Only compiled under `cfg(test)`.

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    CountryCode, DisplayName, Email, Progress, ScreenTime, User, UserDraft, UserId,
};

/// Fixed instant used across service tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 5, 6, 7, 8)
        .single()
        .expect("fixture timestamp should be valid")
}

/// Build a user with the given progress and fixed identity fields.
pub fn sample_user(progress: Progress) -> User {
    sample_user_with("ada@example.com", "Ada Lovelace", "GB", progress)
}

/// Build a user with custom identity fields.
pub fn sample_user_with(email: &str, name: &str, country: &str, progress: Progress) -> User {
    User::new(UserDraft {
        id: UserId::random(),
        email: Email::new(email).expect("valid email"),
        display_name: DisplayName::new(name).expect("valid display name"),
        country: CountryCode::new(country).expect("valid country"),
        is_email_confirmed: false,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
        progress,
        screen_time: ScreenTime {
            daily_goal_minutes: Some(480),
            current_minutes: Some(0),
        },
    })
}

/// Clock whose current instant can be moved forward by tests.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.0.lock().expect("clock lock");
        *guard += delta;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Build a peer summary with the given stats.
pub fn sample_peer(
    name: &str,
    country: &str,
    experience: u64,
    total_minutes: u64,
    goals_completed: u32,
) -> crate::domain::Peer {
    crate::domain::Peer {
        id: UserId::random(),
        display_name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        country: country.to_owned(),
        progress: Progress {
            experience,
            total_minutes,
            goals_completed,
        }
        .into(),
    }
}
