//! Tests for goal values and the stored goal layout.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn open_goal() -> Goal {
    Goal::open(
        GoalId::random(),
        UserId::random(),
        GoalTitle::new("Read daily").expect("valid title"),
        GoalKind::Short,
        at(8),
    )
}

#[fixture]
fn stored_goal() -> Value {
    json!({
        "id": "0c7d9a8e-8f1c-4b7a-9c57-2e1b5c0f6d11",
        "userId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "title": "Run a marathon",
        "type": "long",
        "completed": true,
        "createdAt": "2026-03-01T08:00:00Z",
        "completedAt": "2026-03-01T09:00:00Z"
    })
}

#[rstest]
#[case("  Learn Rust  ", "Learn Rust")]
#[case("Meditate", "Meditate")]
fn titles_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(GoalTitle::new(raw).expect("valid title").as_ref(), expected);
}

#[rstest]
#[case("")]
#[case(" \t ")]
fn blank_titles_are_rejected(#[case] raw: &str) {
    assert_eq!(GoalTitle::new(raw), Err(GoalValidationError::EmptyTitle));
}

#[rstest]
#[case("short", GoalKind::Short)]
#[case("Medium", GoalKind::Medium)]
#[case(" long ", GoalKind::Long)]
fn kinds_parse_case_insensitively(#[case] raw: &str, #[case] expected: GoalKind) {
    assert_eq!(raw.parse::<GoalKind>(), Ok(expected));
}

#[rstest]
fn unknown_kind_is_rejected() {
    assert!(matches!(
        "weekly".parse::<GoalKind>(),
        Err(GoalValidationError::UnknownKind { .. })
    ));
}

#[rstest]
fn completing_sets_timestamp_once(open_goal: Goal) {
    let completed = open_goal.complete(at(9)).expect("open goal completes");

    assert!(completed.is_completed());
    assert_eq!(completed.completed_at(), Some(at(9)));
    assert!(completed.complete(at(10)).is_none());
}

#[rstest]
fn stored_goal_round_trips_through_camel_case(stored_goal: Value) {
    let goal: Goal = serde_json::from_value(stored_goal.clone()).expect("parse goal");

    assert_eq!(goal.kind(), GoalKind::Long);
    assert_eq!(goal.completed_at(), Some(at(9)));
    assert_eq!(serde_json::to_value(&goal).expect("serialise goal"), stored_goal);
}

#[rstest]
fn open_goal_omits_completion_time(open_goal: Goal) {
    let value = serde_json::to_value(&open_goal).expect("serialise goal");

    assert_eq!(value["completed"], false);
    assert!(value.get("completedAt").is_none());
}

#[rstest]
#[case(json!(true), Value::Null)]
#[case(json!(false), json!("2026-03-01T09:00:00Z"))]
fn inconsistent_completion_is_rejected(
    mut stored_goal: Value,
    #[case] completed: Value,
    #[case] completed_at: Value,
) {
    stored_goal["completed"] = completed;
    stored_goal["completedAt"] = completed_at;

    let result: Result<Goal, _> = serde_json::from_value(stored_goal);

    assert!(result.is_err());
}

#[rstest]
fn seed_skips_blank_titles_and_keeps_bucket_order() {
    let seed = GoalSeed {
        short: vec!["  Walk  ".into(), " ".into()],
        medium: vec![String::new()],
        long: vec!["Write a book".into()],
    };

    let titles: Vec<(GoalKind, String)> = seed
        .titles()
        .map(|(kind, title)| (kind, title.into()))
        .collect();

    assert_eq!(
        titles,
        vec![
            (GoalKind::Short, "Walk".to_owned()),
            (GoalKind::Long, "Write a book".to_owned()),
        ]
    );
    assert!(seed.has_any_title());
    assert!(!GoalSeed::default().has_any_title());
}

#[rstest]
fn summary_counts_kinds_and_completion(open_goal: Goal) {
    let done = open_goal.complete(at(9)).expect("completes");
    let medium = Goal::open(
        GoalId::random(),
        open_goal.owner().clone(),
        GoalTitle::new("Ship it").expect("valid title"),
        GoalKind::Medium,
        at(8),
    );

    let summary = GoalSummary::from_goals([&open_goal, &done, &medium]);

    assert_eq!(
        summary,
        GoalSummary {
            total: 3,
            completed: 1,
            short: 2,
            medium: 1,
            long: 0,
        }
    );
}
