//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed identity, goal, and friendship model
//! and the services that move it through its lifecycle. Services receive the
//! acting identity explicitly; nothing here holds an ambient current user.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure payload.
//! - User and its value types; Goal; Friendship; Peer.
//! - SessionService, AccountService, GoalLedger, ProgressionService,
//!   LeaderboardService, FriendsService.
//! - FocusTimer: cancellable countdown that reports completed sessions.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod focus_timer;
pub mod friends;
pub mod goal;
pub mod goal_ledger;
pub mod leaderboard;
pub mod ports;
pub mod progression;
pub mod progression_service;
pub mod registration;
pub mod session_service;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, Password, RegisteredAccount,
};
pub use self::error::{DomainError, ErrorCode, ErrorValidationError};
pub use self::focus_timer::{
    Activity, FocusDuration, FocusEvents, FocusSessionCompleted, FocusTimer, TimerState,
    TimerStatus,
};
pub use self::friends::{
    Connection, FriendsService, Friendship, FriendshipId, FriendshipStatus, SelfFriendship,
};
pub use self::goal::{
    Goal, GoalId, GoalKind, GoalSeed, GoalStatus, GoalSummary, GoalTitle, GoalValidationError,
};
pub use self::goal_ledger::GoalLedger;
pub use self::leaderboard::{
    LeaderboardScope, LeaderboardService, LeaderboardSort, Peer, PeerProgress, Standing,
    Standings, UnknownLeaderboardOption, rank,
};
pub use self::progression::{
    MonkRank, Progress, apply_focus_minutes, apply_goal_completion, level_for,
};
pub use self::progression_service::ProgressionService;
pub use self::registration::{
    DEFAULT_DAILY_SCREEN_TIME_MINUTES, RegistrationOutcome, RegistrationRejection,
    RegistrationRequest,
};
pub use self::session_service::SessionService;
pub use self::user::{
    CountryCode, DisplayName, Email, ScreenTime, User, UserDraft, UserId, UserValidationError,
};
