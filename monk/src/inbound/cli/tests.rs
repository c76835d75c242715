//! Command-line adapter tests over in-memory storage.

use std::sync::Arc;

use clap::Parser;
use rstest::{fixture, rstest};

use super::*;
use crate::app::Monk;
use crate::domain::ports::FixturePeerDirectory;
use crate::domain::{Peer, User};
use crate::outbound::storage::MemoryStorage;
use crate::test_support::{MutableClock, fixture_timestamp, sample_peer};

type TestMonk = Monk<MemoryStorage, FixturePeerDirectory>;

struct Harness {
    app: TestMonk,
    grace: Peer,
}

#[fixture]
fn harness() -> Harness {
    let grace = sample_peer("Grace Hopper", "US", 5_000, 400, 2);
    let alan = sample_peer("Alan Turing", "GB", 0, 0, 0);
    let app = Monk::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(FixturePeerDirectory::new(vec![grace.clone(), alan])),
        Arc::new(MutableClock::new(fixture_timestamp())),
    );
    Harness { app, grace }
}

async fn exec(app: &TestMonk, args: &[&str]) -> (Result<(), CliError>, String) {
    let cli = Cli::try_parse_from(std::iter::once("monk").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut out = Vec::new();
    let result = run(app, cli.command, &mut out).await;
    (result, String::from_utf8(out).expect("utf8 output"))
}

const REGISTER_ADA: &[&str] = &[
    "register",
    "--name",
    "Ada Lovelace",
    "--email",
    "ada@example.com",
    "--password",
    "secret1",
    "--country",
    "gb",
    "--short",
    "Read daily",
    "--long",
    "Write a book",
];

async fn register_ada(app: &TestMonk) -> User {
    let (result, _) = exec(app, REGISTER_ADA).await;
    result.expect("registration succeeds");
    app.current_user().await.expect("signed in")
}

#[rstest]
#[tokio::test]
async fn register_signs_in_and_seeds_goals(harness: Harness) {
    let (result, output) = exec(&harness.app, REGISTER_ADA).await;
    result.expect("registration succeeds");
    assert!(output.contains("Welcome, Ada Lovelace!"));

    let (result, output) = exec(&harness.app, &["whoami"]).await;
    result.expect("whoami succeeds");
    assert!(output.contains("Ada Lovelace <ada@example.com> [GB]"));
    assert!(output.contains("Level 1 Novice Monk: 0 XP"));
    assert!(output.contains("Goals: 0/2 completed (1 short, 0 medium, 1 long)"));
}

#[rstest]
#[tokio::test]
async fn registration_without_goals_is_rejected(harness: Harness) {
    let args: Vec<&str> = REGISTER_ADA
        .iter()
        .copied()
        .take_while(|arg| *arg != "--short")
        .collect();

    let (result, _) = exec(&harness.app, &args).await;

    let error = result.expect_err("rejected");
    assert_eq!(
        error.to_string(),
        "Please add at least one goal to get started"
    );
    assert_eq!(error.exit_code(), 2);
    let (_, output) = exec(&harness.app, &["whoami"]).await;
    assert_eq!(output, "Not signed in\n");
}

#[rstest]
#[tokio::test]
async fn login_with_wrong_password_changes_nothing(harness: Harness) {
    register_ada(&harness.app).await;
    exec(&harness.app, &["logout"]).await.0.expect("logout");

    let (result, _) = exec(
        &harness.app,
        &["login", "--email", "ada@example.com", "--password", "wrong!"],
    )
    .await;
    assert_eq!(
        result.expect_err("rejected").to_string(),
        "Invalid email or password"
    );
    let (_, output) = exec(&harness.app, &["whoami"]).await;
    assert_eq!(output, "Not signed in\n");

    let (result, output) = exec(
        &harness.app,
        &["login", "--email", "ada@example.com", "--password", "secret1"],
    )
    .await;
    result.expect("login succeeds");
    assert_eq!(output, "Welcome back, Ada Lovelace\n");
}

#[rstest]
#[tokio::test]
async fn completing_a_goal_awards_the_bonus_once(harness: Harness) {
    let user = register_ada(&harness.app).await;
    exec(&harness.app, &["goal", "add", "Meditate", "--kind", "medium"])
        .await
        .0
        .expect("goal added");
    let goals = harness
        .app
        .goals
        .list_for(user.id(), Some(crate::domain::GoalKind::Medium))
        .await
        .expect("goals");
    let id = goals.first().expect("medium goal").id().to_string();

    let (result, output) = exec(&harness.app, &["goal", "complete", &id]).await;
    result.expect("completion succeeds");
    assert_eq!(output, "Goal completed! 500 XP, level 1\n");

    let (result, output) = exec(&harness.app, &["goal", "complete", &id]).await;
    result.expect("repeat completion is a no-op");
    assert_eq!(output, "Nothing to complete\n");

    let (_, output) = exec(&harness.app, &["goal", "list", "--kind", "medium"]).await;
    assert_eq!(output, format!("[x] Meditate (medium) {id}\n"));
}

#[rstest]
#[tokio::test]
async fn malformed_goal_id_is_an_invalid_request(harness: Harness) {
    register_ada(&harness.app).await;

    let (result, _) = exec(&harness.app, &["goal", "complete", "not-a-uuid"]).await;

    assert_eq!(result.expect_err("invalid").exit_code(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn focus_session_runs_to_completion_and_awards_experience(harness: Harness) {
    register_ada(&harness.app).await;

    let (result, output) = exec(&harness.app, &["focus", "--activity", "study", "--minutes", "1"]).await;

    result.expect("focus succeeds");
    assert_eq!(
        output,
        "Focusing on study for 1 minutes\nSession complete: +1 minutes, 10 XP, level 1\n"
    );
    let user = harness.app.current_user().await.expect("signed in");
    assert_eq!(user.progress().total_minutes, 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn long_focus_session_levels_up(harness: Harness) {
    register_ada(&harness.app).await;

    let (result, output) = exec(&harness.app, &["focus", "--minutes", "100"]).await;

    result.expect("focus succeeds");
    assert!(output.contains("1000 XP, level 2"));
    assert!(output.contains("Level up! Rank: Novice Monk"));
}

#[rstest]
#[case("0")]
#[case("121")]
#[tokio::test]
async fn focus_rejects_out_of_range_minutes(harness: Harness, #[case] minutes: &str) {
    register_ada(&harness.app).await;

    let (result, _) = exec(&harness.app, &["focus", "--minutes", minutes]).await;

    assert_eq!(result.expect_err("out of range").exit_code(), 2);
}

#[rstest]
#[tokio::test]
async fn leaderboard_ranks_peers_ahead_on_ties(harness: Harness) {
    register_ada(&harness.app).await;

    let (result, output) = exec(&harness.app, &["leaderboard"]).await;

    result.expect("leaderboard succeeds");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines.first().is_some_and(|line| line.starts_with("#1 Grace Hopper")));
    assert!(lines.get(2).is_some_and(|line| line.starts_with("#3 Ada Lovelace (you)")));
    assert_eq!(lines.last(), Some(&"Your rank: 3 of 3"));
}

#[rstest]
#[tokio::test]
async fn local_leaderboard_only_shows_compatriots(harness: Harness) {
    register_ada(&harness.app).await;

    let (_, output) = exec(&harness.app, &["leaderboard", "--scope", "local"]).await;

    assert!(!output.contains("Grace Hopper"));
    assert!(output.contains("Alan Turing"));
    assert!(output.ends_with("Your rank: 2 of 2\n"));
}

#[rstest]
#[tokio::test]
async fn friend_requests_show_up_once_sent(harness: Harness) {
    register_ada(&harness.app).await;
    let grace_id = harness.grace.id.to_string();

    let (result, output) = exec(&harness.app, &["friends", "request", &grace_id]).await;
    result.expect("request sent");
    assert!(output.starts_with("Friend request "));

    let (result, _) = exec(&harness.app, &["friends", "request", &grace_id]).await;
    assert_eq!(result.expect_err("duplicate").exit_code(), 6);

    let (_, output) = exec(&harness.app, &["friends", "list"]).await;
    assert_eq!(output, "Friends (0):\nIncoming requests (0):\n");
}

#[rstest]
#[tokio::test]
async fn sent_requests_cannot_be_declined_or_removed_by_the_sender(harness: Harness) {
    register_ada(&harness.app).await;
    let grace_id = harness.grace.id.to_string();
    let (result, output) = exec(&harness.app, &["friends", "request", &grace_id]).await;
    result.expect("request sent");
    let id = output
        .split_whitespace()
        .nth(2)
        .expect("friendship id in output")
        .to_owned();

    let (result, _) = exec(&harness.app, &["friends", "decline", &id]).await;
    assert_eq!(result.expect_err("sender cannot decline").exit_code(), 4);

    let (result, _) = exec(&harness.app, &["friends", "remove", &id]).await;
    assert_eq!(result.expect_err("still pending").exit_code(), 6);
}

#[rstest]
#[case("decline")]
#[case("remove")]
#[tokio::test]
async fn unknown_friendships_are_not_found(harness: Harness, #[case] verb: &str) {
    register_ada(&harness.app).await;

    let (result, _) = exec(
        &harness.app,
        &["friends", verb, "0c7d9a8e-8f1c-4b7a-9c57-2e1b5c0f6d11"],
    )
    .await;

    assert_eq!(result.expect_err("missing").exit_code(), 5);
}

#[rstest]
#[tokio::test]
async fn search_matches_names_case_insensitively(harness: Harness) {
    register_ada(&harness.app).await;

    let (_, output) = exec(&harness.app, &["friends", "search", "HOPPER"]).await;
    assert!(output.contains("Grace Hopper <grace.hopper@example.com> [US] level 6"));

    let (_, output) = exec(&harness.app, &["friends", "search", "zzz"]).await;
    assert_eq!(output, "No peers match \"zzz\"\n");
}

#[rstest]
#[case(&["whoami"][..], true)]
#[case(&["goal", "list"][..], false)]
#[case(&["leaderboard"][..], false)]
#[case(&["friends", "list"][..], false)]
#[tokio::test]
async fn session_bound_commands_require_login(
    harness: Harness,
    #[case] args: &[&str],
    #[case] succeeds: bool,
) {
    let (result, _) = exec(&harness.app, args).await;

    match result {
        Ok(()) => assert!(succeeds),
        Err(error) => {
            assert!(!succeeds);
            assert_eq!(error.exit_code(), 3);
        }
    }
}

#[rstest]
#[case(&["monk", "leaderboard", "--scope", "galaxy"][..])]
#[case(&["monk", "goal", "add", "x", "--kind", "eternal"][..])]
#[case(&["monk", "focus", "--activity", "napping"][..])]
fn unknown_option_values_fail_to_parse(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}
