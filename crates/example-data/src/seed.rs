//! Generated peer seed types.
//!
//! These types are independent of the `monk` domain types; the consuming
//! adapter converts them at the point of use.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated example peer record.
///
/// Progress fields are consistent with the domain's experience rules: ten
/// experience per focused minute plus five hundred per completed goal.
///
/// # Example
///
/// ```
/// use example_data::ExamplePeerSeed;
/// use uuid::Uuid;
///
/// let peer = ExamplePeerSeed {
///     id: Uuid::new_v4(),
///     display_name: "Ada Lovelace".to_owned(),
///     email: "ada.lovelace@example.com".to_owned(),
///     country: "GB".to_owned(),
///     experience: 1_500,
///     total_minutes: 100,
///     goals_completed: 1,
/// };
///
/// assert_eq!(peer.display_name, "Ada Lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePeerSeed {
    /// Unique identifier for the peer.
    pub id: Uuid,
    /// Human-readable display name.
    pub display_name: String,
    /// Contact address derived from the display name.
    pub email: String,
    /// Upper-case two-letter country code.
    pub country: String,
    /// Accumulated experience.
    pub experience: u64,
    /// Minutes spent in completed focus sessions.
    pub total_minutes: u64,
    /// Number of completed goals.
    pub goals_completed: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_peer_seed_serializes_to_camel_case() {
        let peer = ExamplePeerSeed {
            id: Uuid::nil(),
            display_name: "Test".to_owned(),
            email: "test@example.com".to_owned(),
            country: "GB".to_owned(),
            experience: 0,
            total_minutes: 0,
            goals_completed: 0,
        };
        let json = serde_json::to_string(&peer).expect("serialize");
        assert!(json.contains("displayName"));
        assert!(json.contains("totalMinutes"));
        assert!(json.contains("goalsCompleted"));
    }
}
