//! Leaderboard ranking.
//!
//! Standings compare the signed-in user against peers in one of three
//! scopes. Sorting is descending and stable, and the current user is placed
//! after peers before sorting, so ties rank peers first.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::ports::{FriendshipRepository, PeerDirectory, PeerDirectoryError};
use crate::domain::{DomainError, FriendshipStatus, Progress, User, UserId};

use super::friends::map_friendship_error;

/// Read-only summary of another identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Peer {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
    pub country: String,
    #[serde(flatten)]
    pub progress: PeerProgress,
}

/// Progress fields shown for a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProgress {
    pub level: u32,
    pub experience: u64,
    pub total_minutes: u64,
    pub goals_completed: u32,
}

impl From<Progress> for PeerProgress {
    fn from(value: Progress) -> Self {
        Self {
            level: value.level(),
            experience: value.experience,
            total_minutes: value.total_minutes,
            goals_completed: value.goals_completed,
        }
    }
}

impl From<&User> for Peer {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            display_name: user.display_name().to_string(),
            email: user.email().to_string(),
            country: user.country().to_string(),
            progress: user.progress().into(),
        }
    }
}

/// Unknown scope or sort key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLeaderboardOption(pub String);

impl fmt::Display for UnknownLeaderboardOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown leaderboard option {:?}", self.0)
    }
}

impl std::error::Error for UnknownLeaderboardOption {}

/// Which peers take part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardScope {
    #[default]
    Global,
    /// Peers in the same country as the current user.
    Local,
    /// Peers with an accepted friendship.
    Friends,
}

impl FromStr for LeaderboardScope {
    type Err = UnknownLeaderboardOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "local" => Ok(Self::Local),
            "friends" => Ok(Self::Friends),
            _ => Err(UnknownLeaderboardOption(value.to_owned())),
        }
    }
}

/// Ranking key; all keys sort descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardSort {
    #[default]
    Experience,
    TotalMinutes,
    GoalsCompleted,
}

impl LeaderboardSort {
    fn key(self, progress: &PeerProgress) -> u64 {
        match self {
            Self::Experience => progress.experience,
            Self::TotalMinutes => progress.total_minutes,
            Self::GoalsCompleted => u64::from(progress.goals_completed),
        }
    }
}

impl FromStr for LeaderboardSort {
    type Err = UnknownLeaderboardOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "experience" | "xp" => Ok(Self::Experience),
            "totalminutes" | "minutes" => Ok(Self::TotalMinutes),
            "goalscompleted" | "goals" => Ok(Self::GoalsCompleted),
            _ => Err(UnknownLeaderboardOption(value.to_owned())),
        }
    }
}

/// One row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub rank: usize,
    pub peer: Peer,
    pub is_current_user: bool,
}

/// Ordered leaderboard rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub entries: Vec<Standing>,
    /// 1-based rank of the current user.
    pub current_rank: usize,
}

/// Rank `current` against `peers`.
///
/// `friend_ids` lists identities with an accepted friendship and is only
/// consulted for [`LeaderboardScope::Friends`]. Peers sharing the current
/// user's id are ignored.
pub fn rank(
    current: &User,
    peers: &[Peer],
    friend_ids: &[UserId],
    scope: LeaderboardScope,
    sort: LeaderboardSort,
) -> Standings {
    let country = current.country().as_ref();
    let mut rows: Vec<(Peer, bool)> = peers
        .iter()
        .filter(|peer| peer.id != *current.id())
        .filter(|peer| match scope {
            LeaderboardScope::Global => true,
            LeaderboardScope::Local => peer.country.eq_ignore_ascii_case(country),
            LeaderboardScope::Friends => friend_ids.contains(&peer.id),
        })
        .map(|peer| (peer.clone(), false))
        .collect();
    rows.push((Peer::from(current), true));
    rows.sort_by_key(|(peer, _)| std::cmp::Reverse(sort.key(&peer.progress)));

    let mut current_rank = rows.len();
    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(index, (peer, is_current_user))| {
            if is_current_user {
                current_rank = index + 1;
            }
            Standing {
                rank: index + 1,
                peer,
                is_current_user,
            }
        })
        .collect();
    Standings {
        entries,
        current_rank,
    }
}

/// Loads peers and friendships, then ranks.
#[derive(Clone)]
pub struct LeaderboardService<P, F> {
    peers: Arc<P>,
    friendships: Arc<F>,
}

impl<P, F> LeaderboardService<P, F> {
    /// Create a new service over the given ports.
    pub fn new(peers: Arc<P>, friendships: Arc<F>) -> Self {
        Self { peers, friendships }
    }
}

impl<P, F> LeaderboardService<P, F>
where
    P: PeerDirectory,
    F: FriendshipRepository,
{
    /// Standings for `current` in `scope`, ordered by `sort`.
    pub async fn standings(
        &self,
        current: &User,
        scope: LeaderboardScope,
        sort: LeaderboardSort,
    ) -> Result<Standings, DomainError> {
        let peers = self.peers.peers().await.map_err(map_peer_error)?;
        let friend_ids = if scope == LeaderboardScope::Friends {
            self.friendships
                .list_involving(current.id())
                .await
                .map_err(map_friendship_error)?
                .iter()
                .filter(|friendship| friendship.status() == FriendshipStatus::Accepted)
                .filter_map(|friendship| friendship.other_party(current.id()).cloned())
                .collect()
        } else {
            Vec::new()
        };
        Ok(rank(current, &peers, &friend_ids, scope, sort))
    }
}

pub(crate) fn map_peer_error(error: PeerDirectoryError) -> DomainError {
    match error {
        PeerDirectoryError::Unavailable { message } => {
            DomainError::service_unavailable(format!("peer directory unavailable: {message}"))
        }
    }
}
