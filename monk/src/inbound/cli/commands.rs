//! Command handlers: parse identifiers, call services, render lines.

use std::io::Write;

use serde_json::json;
use tracing::debug;
use zeroize::Zeroizing;

use crate::app::Monk;
use crate::domain::ports::PeerDirectory;
use crate::domain::{
    Connection, DomainError, FocusDuration, FocusTimer, FriendshipId, GoalId, GoalSeed, MonkRank,
    RegistrationOutcome, RegistrationRequest, Standing, User, UserId,
};
use crate::outbound::storage::StorageBackend;

use super::{
    CliError, Command, FocusArgs, FriendsCommand, GoalCommand, LeaderboardArgs, RegisterArgs,
};

/// Execute `command` against `app`, writing output to `out`.
pub async fn run<B, P>(
    app: &Monk<B, P>,
    command: Command,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    match command {
        Command::Register(args) => register(app, args, out).await,
        Command::Login { email, password } => login(app, &email, &password, out).await,
        Command::Logout => {
            app.session.logout().await?;
            writeln!(out, "Signed out")?;
            Ok(())
        }
        Command::Whoami => whoami(app, out).await,
        Command::Goal(goal) => goal_command(app, goal, out).await,
        Command::Focus(args) => focus(app, args, out).await,
        Command::Leaderboard(args) => leaderboard(app, args, out).await,
        Command::Friends(friends) => friends_command(app, friends, out).await,
    }
}

async fn register<B, P>(
    app: &Monk<B, P>,
    args: RegisterArgs,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let request = RegistrationRequest {
        name: args.name,
        email: args.email,
        password: Zeroizing::new(args.password),
        country: args.country,
        daily_screen_time_goal: args.screen_time_goal,
        goals: GoalSeed {
            short: args.short,
            medium: args.medium,
            long: args.long,
        },
    };
    match app.accounts.register(request).await? {
        RegistrationOutcome::Registered(user) => {
            writeln!(
                out,
                "Welcome, {}! Your journey begins at level 1.",
                user.display_name()
            )?;
            Ok(())
        }
        RegistrationOutcome::Rejected(rejection) => Err(CliError::rejected(rejection.message())),
    }
}

async fn login<B, P>(
    app: &Monk<B, P>,
    email: &str,
    password: &str,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let Some(user) = app.session.login(email, password).await? else {
        return Err(CliError::rejected("Invalid email or password"));
    };
    writeln!(out, "Welcome back, {}", user.display_name())?;
    Ok(())
}

async fn whoami<B, P>(app: &Monk<B, P>, out: &mut dyn Write) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let Some(user) = app.session.restore().await? else {
        writeln!(out, "Not signed in")?;
        return Ok(());
    };
    let summary = app.goals.summary(user.id()).await?;
    write_profile(out, &user)?;
    writeln!(
        out,
        "Goals: {}/{} completed ({} short, {} medium, {} long)",
        summary.completed, summary.total, summary.short, summary.medium, summary.long
    )?;
    Ok(())
}

fn write_profile(out: &mut dyn Write, user: &User) -> Result<(), CliError> {
    let progress = user.progress();
    writeln!(
        out,
        "{} <{}> [{}]",
        user.display_name(),
        user.email(),
        user.country()
    )?;
    writeln!(
        out,
        "Level {} {}: {} XP, {} minutes focused, {} goals completed",
        user.level(),
        MonkRank::for_level(user.level()),
        progress.experience,
        progress.total_minutes,
        progress.goals_completed
    )?;
    Ok(())
}

async fn goal_command<B, P>(
    app: &Monk<B, P>,
    command: GoalCommand,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let user = app.current_user().await?;
    match command {
        GoalCommand::Add { title, kind } => {
            let goal = app.goals.add(user.id(), &title, kind).await?;
            writeln!(out, "Added {} goal {}: {}", goal.kind(), goal.id(), goal.title())?;
        }
        GoalCommand::Complete { id } => {
            let goal_id = GoalId::new(&id).map_err(|_| {
                DomainError::invalid_request("Goal id must be a UUID")
                    .with_details(json!({"field": "id"}))
            })?;
            let updated = app.progression.complete_goal(&user, &goal_id).await?;
            if updated.progress().goals_completed > user.progress().goals_completed {
                writeln!(
                    out,
                    "Goal completed! {} XP, level {}",
                    updated.progress().experience,
                    updated.level()
                )?;
            } else {
                writeln!(out, "Nothing to complete")?;
            }
        }
        GoalCommand::List { kind } => {
            let goals = app.goals.list_for(user.id(), kind).await?;
            if goals.is_empty() {
                writeln!(out, "No goals yet")?;
            }
            for goal in goals {
                let mark = if goal.is_completed() { "x" } else { " " };
                writeln!(out, "[{mark}] {} ({}) {}", goal.title(), goal.kind(), goal.id())?;
            }
        }
    }
    Ok(())
}

async fn focus<B, P>(
    app: &Monk<B, P>,
    args: FocusArgs,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let user = app.current_user().await?;
    let (mut timer, mut events) = FocusTimer::new(args.activity);
    if let Some(minutes) = args.minutes {
        let duration = FocusDuration::new(minutes).map_err(|err| {
            DomainError::invalid_request(err.to_string()).with_details(json!({"field": "minutes"}))
        })?;
        timer.set_duration(duration);
    }
    let status = timer.status();
    writeln!(
        out,
        "Focusing on {} for {} minutes",
        status.activity,
        status.duration.minutes()
    )?;
    out.flush()?;

    timer.start();
    let Some(completed) = events.next().await else {
        return Err(DomainError::internal("focus timer stopped before completing").into());
    };
    drop(timer);
    debug!(activity = %completed.activity, minutes = completed.minutes, "focus session finished");

    let before = user.level();
    let updated = app.progression.record_focus(&user, completed.minutes).await?;
    writeln!(
        out,
        "Session complete: +{} minutes, {} XP, level {}",
        completed.minutes,
        updated.progress().experience,
        updated.level()
    )?;
    if updated.level() > before {
        writeln!(out, "Level up! Rank: {}", MonkRank::for_level(updated.level()))?;
    }
    Ok(())
}

async fn leaderboard<B, P>(
    app: &Monk<B, P>,
    args: LeaderboardArgs,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let user = app.current_user().await?;
    let standings = app
        .leaderboard
        .standings(&user, args.scope, args.sort)
        .await?;
    for standing in &standings.entries {
        write_standing(out, standing)?;
    }
    writeln!(
        out,
        "Your rank: {} of {}",
        standings.current_rank,
        standings.entries.len()
    )?;
    Ok(())
}

fn write_standing(out: &mut dyn Write, standing: &Standing) -> Result<(), CliError> {
    let peer = &standing.peer;
    let marker = if standing.is_current_user { " (you)" } else { "" };
    writeln!(
        out,
        "#{} {}{} [{}] level {}, {} XP, {} min, {} goals",
        standing.rank,
        peer.display_name,
        marker,
        peer.country,
        peer.progress.level,
        peer.progress.experience,
        peer.progress.total_minutes,
        peer.progress.goals_completed
    )?;
    Ok(())
}

async fn friends_command<B, P>(
    app: &Monk<B, P>,
    command: FriendsCommand,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    B: StorageBackend,
    P: PeerDirectory,
{
    let user = app.current_user().await?;
    match command {
        FriendsCommand::Request { user_id } => {
            let target = UserId::new(&user_id).map_err(|err| {
                DomainError::invalid_request(err.to_string())
                    .with_details(json!({"field": "userId"}))
            })?;
            let friendship = app.friends.request(&user, &target).await?;
            writeln!(out, "Friend request {} sent", friendship.id())?;
        }
        FriendsCommand::Accept { id } => {
            let friendship = app.friends.accept(&parse_friendship_id(&id)?, user.id()).await?;
            writeln!(out, "Friend request {} accepted", friendship.id())?;
        }
        FriendsCommand::Decline { id } => {
            let friendship_id = parse_friendship_id(&id)?;
            app.friends.decline(&friendship_id, user.id()).await?;
            writeln!(out, "Friend request {friendship_id} declined")?;
        }
        FriendsCommand::Block { id } => {
            let friendship = app.friends.block(&parse_friendship_id(&id)?, user.id()).await?;
            writeln!(out, "Friendship {} blocked", friendship.id())?;
        }
        FriendsCommand::Remove { id } => {
            let friendship_id = parse_friendship_id(&id)?;
            app.friends.remove(&friendship_id, user.id()).await?;
            writeln!(out, "Friendship {friendship_id} removed")?;
        }
        FriendsCommand::List => {
            let friends = app.friends.friends_of(user.id()).await?;
            let incoming = app.friends.incoming(user.id()).await?;
            writeln!(out, "Friends ({}):", friends.len())?;
            for connection in &friends {
                write_connection(out, connection)?;
            }
            writeln!(out, "Incoming requests ({}):", incoming.len())?;
            for connection in &incoming {
                write_connection(out, connection)?;
            }
        }
        FriendsCommand::Search { query } => {
            let peers = app.friends.search(&query, user.id()).await?;
            if peers.is_empty() {
                writeln!(out, "No peers match {query:?}")?;
            }
            for peer in peers {
                writeln!(
                    out,
                    "{} {} <{}> [{}] level {}",
                    peer.id, peer.display_name, peer.email, peer.country, peer.progress.level
                )?;
            }
        }
    }
    Ok(())
}

fn parse_friendship_id(raw: &str) -> Result<FriendshipId, CliError> {
    FriendshipId::parse(raw).ok_or_else(|| {
        DomainError::invalid_request("Friendship id must be a UUID")
            .with_details(json!({"field": "id"}))
            .into()
    })
}

fn write_connection(out: &mut dyn Write, connection: &Connection) -> Result<(), CliError> {
    let name = connection
        .peer
        .as_ref()
        .map_or_else(|| connection.other.to_string(), |peer| peer.display_name.clone());
    writeln!(
        out,
        "  {} {} ({})",
        connection.friendship.id(),
        name,
        connection.friendship.status()
    )?;
    Ok(())
}
