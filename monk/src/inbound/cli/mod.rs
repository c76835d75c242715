//! Command-line adapter.
//!
//! ```text
//! monk register --name "Ada" --email ada@example.com --password secret1 \
//!     --country GB --short "Read daily"
//! monk login --email ada@example.com --password secret1
//! monk goal add "Meditate" --kind medium
//! monk focus --activity study --minutes 45
//! monk leaderboard --scope local --sort minutes
//! monk friends search ada
//! monk friends decline 0c7d9a8e-8f1c-4b7a-9c57-2e1b5c0f6d11
//! ```
//!
//! Commands write human-readable lines to the supplied writer. Identity comes
//! from the stored session, never from arguments.

mod commands;
mod error;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Activity, GoalKind, LeaderboardScope, LeaderboardSort};

pub use commands::run;
pub use error::CliError;

/// `monk` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "monk",
    about = "Focus timer, goals, and leaderboards for aspiring monks",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account, seed its goals, and sign in.
    Register(RegisterArgs),
    /// Sign in with an email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out. Safe to repeat.
    Logout,
    /// Show the signed-in identity and its progress.
    Whoami,
    /// Manage goals.
    #[command(subcommand)]
    Goal(GoalCommand),
    /// Run a focus session to completion and record it.
    Focus(FocusArgs),
    /// Show standings against peers.
    Leaderboard(LeaderboardArgs),
    /// Manage friends.
    #[command(subcommand)]
    Friends(FriendsCommand),
}

/// Arguments for `monk register`.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    /// Two-letter country code.
    #[arg(long)]
    pub country: String,
    /// Daily screen-time goal in minutes.
    #[arg(long, value_name = "minutes")]
    pub screen_time_goal: Option<u32>,
    /// Short-term goal title; repeat for more.
    #[arg(long = "short", value_name = "title")]
    pub short: Vec<String>,
    /// Medium-term goal title; repeat for more.
    #[arg(long = "medium", value_name = "title")]
    pub medium: Vec<String>,
    /// Long-term goal title; repeat for more.
    #[arg(long = "long", value_name = "title")]
    pub long: Vec<String>,
}

/// `monk goal` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum GoalCommand {
    /// Add an open goal.
    Add {
        title: String,
        #[arg(long, default_value = "short")]
        kind: GoalKind,
    },
    /// Complete a goal and collect its bonus.
    Complete { id: String },
    /// List goals, optionally of one kind.
    List {
        #[arg(long)]
        kind: Option<GoalKind>,
    },
}

/// Arguments for `monk focus`.
#[derive(Debug, Clone, Args)]
pub struct FocusArgs {
    /// work, study, exercise, or break.
    #[arg(long, default_value = "work")]
    pub activity: Activity,
    /// Custom length in minutes, overriding the activity default.
    #[arg(long)]
    pub minutes: Option<u32>,
}

/// Arguments for `monk leaderboard`.
#[derive(Debug, Clone, Args)]
pub struct LeaderboardArgs {
    /// global, local, or friends.
    #[arg(long, default_value = "global")]
    pub scope: LeaderboardScope,
    /// experience, minutes, or goals.
    #[arg(long, default_value = "experience")]
    pub sort: LeaderboardSort,
}

/// `monk friends` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum FriendsCommand {
    /// Send a friend request to a peer id.
    Request { user_id: String },
    /// Accept an incoming request.
    Accept { id: String },
    /// Decline an incoming request.
    Decline { id: String },
    /// Block a friendship from either side.
    Block { id: String },
    /// End an accepted friendship.
    Remove { id: String },
    /// List friends and incoming requests.
    List,
    /// Find peers by name or email.
    Search { query: String },
}

#[cfg(test)]
mod tests;
