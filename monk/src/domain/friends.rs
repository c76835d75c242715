//! Friendships between identities.
//!
//! A request starts pending. Only the addressee may accept or decline it;
//! either party may block, and either party may remove an accepted
//! friendship. Declining and removing delete the record. An identity can
//! never befriend itself, and at most one friendship links any pair
//! regardless of who asked first.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::leaderboard::map_peer_error;
use crate::domain::ports::{FriendshipRepository, FriendshipRepositoryError, PeerDirectory};
use crate::domain::{DomainError, Peer, User, UserId};

/// Stable friendship identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendshipId(Uuid);

impl FriendshipId {
    /// Parse from the hyphenated form; `None` if it is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Generate a new random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FriendshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of a friendship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Blocked,
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Blocked => "blocked",
        };
        f.write_str(label)
    }
}

/// Error returned when a stored friendship links an identity to itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfFriendship;

impl fmt::Display for SelfFriendship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a friendship must link two different identities")
    }
}

impl std::error::Error for SelfFriendship {}

/// A directed friend request and its current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FriendshipDto", into = "FriendshipDto")]
pub struct Friendship {
    id: FriendshipId,
    requester: UserId,
    addressee: UserId,
    status: FriendshipStatus,
    created_at: DateTime<Utc>,
}

impl Friendship {
    /// A new pending request.
    pub fn request(
        requester: UserId,
        addressee: UserId,
        created_at: DateTime<Utc>,
    ) -> Result<Self, SelfFriendship> {
        if requester == addressee {
            return Err(SelfFriendship);
        }
        Ok(Self {
            id: FriendshipId::random(),
            requester,
            addressee,
            status: FriendshipStatus::Pending,
            created_at,
        })
    }

    pub fn id(&self) -> FriendshipId {
        self.id
    }

    /// Identity that sent the request.
    pub fn requester(&self) -> &UserId {
        &self.requester
    }

    /// Identity the request was sent to.
    pub fn addressee(&self) -> &UserId {
        &self.addressee
    }

    pub fn status(&self) -> FriendshipStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `true` when `user` is either party.
    pub fn involves(&self, user: &UserId) -> bool {
        self.requester == *user || self.addressee == *user
    }

    /// `true` when this friendship joins `a` and `b` in either direction.
    pub fn links(&self, a: &UserId, b: &UserId) -> bool {
        self.involves(a) && self.involves(b)
    }

    /// The party that is not `user`, if `user` is involved.
    pub fn other_party(&self, user: &UserId) -> Option<&UserId> {
        if self.requester == *user {
            Some(&self.addressee)
        } else if self.addressee == *user {
            Some(&self.requester)
        } else {
            None
        }
    }

    pub(crate) fn with_status(&self, status: FriendshipStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FriendshipDto {
    id: FriendshipId,
    user_id: UserId,
    friend_id: UserId,
    status: FriendshipStatus,
    created_at: DateTime<Utc>,
}

impl From<Friendship> for FriendshipDto {
    fn from(value: Friendship) -> Self {
        Self {
            id: value.id,
            user_id: value.requester,
            friend_id: value.addressee,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<FriendshipDto> for Friendship {
    type Error = SelfFriendship;

    fn try_from(value: FriendshipDto) -> Result<Self, Self::Error> {
        if value.user_id == value.friend_id {
            return Err(SelfFriendship);
        }
        Ok(Self {
            id: value.id,
            requester: value.user_id,
            addressee: value.friend_id,
            status: value.status,
            created_at: value.created_at,
        })
    }
}

/// A friendship seen from one side, with the other party's summary when the
/// peer directory knows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub friendship: Friendship,
    pub other: UserId,
    pub peer: Option<Peer>,
}

/// Friend requests, acceptance, blocking, and peer search.
#[derive(Clone)]
pub struct FriendsService<F, P> {
    friendships: Arc<F>,
    peers: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<F, P> FriendsService<F, P> {
    /// Create a new service with the given ports.
    pub fn new(friendships: Arc<F>, peers: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self {
            friendships,
            peers,
            clock,
        }
    }
}

impl<F, P> FriendsService<F, P>
where
    F: FriendshipRepository,
    P: PeerDirectory,
{
    /// Send a friend request from `from` to the peer `to`.
    pub async fn request(&self, from: &User, to: &UserId) -> Result<Friendship, DomainError> {
        if from.id() == to {
            return Err(DomainError::invalid_request(
                "You cannot send a friend request to yourself",
            ));
        }
        let peers = self.peers.peers().await.map_err(map_peer_error)?;
        if !peers.iter().any(|peer| peer.id == *to) {
            return Err(DomainError::not_found("No user found with that id"));
        }
        let existing = self
            .friendships
            .list_involving(from.id())
            .await
            .map_err(map_friendship_error)?;
        if existing.iter().any(|friendship| friendship.links(from.id(), to)) {
            return Err(DomainError::conflict(
                "A friendship or pending request already exists with this user",
            ));
        }

        let friendship = Friendship::request(from.id().clone(), to.clone(), self.clock.utc())
            .map_err(|err| DomainError::invalid_request(err.to_string()))?;
        self.friendships
            .insert(&friendship)
            .await
            .map_err(map_friendship_error)?;
        info!(friendship_id = %friendship.id(), from = %from.id(), to = %to, "friend request sent");
        Ok(friendship)
    }

    /// Accept a pending request addressed to `actor`.
    pub async fn accept(
        &self,
        id: &FriendshipId,
        actor: &UserId,
    ) -> Result<Friendship, DomainError> {
        let friendship = self.load(id).await?;
        if friendship.addressee() != actor {
            return Err(DomainError::forbidden(
                "Only the recipient can accept this friend request",
            ));
        }
        if friendship.status() != FriendshipStatus::Pending {
            return Err(DomainError::conflict(format!(
                "This friend request is already {}",
                friendship.status()
            )));
        }
        self.store(friendship.with_status(FriendshipStatus::Accepted))
            .await
    }

    /// Block the other party of a friendship `actor` belongs to.
    pub async fn block(
        &self,
        id: &FriendshipId,
        actor: &UserId,
    ) -> Result<Friendship, DomainError> {
        let friendship = self.load(id).await?;
        if !friendship.involves(actor) {
            return Err(DomainError::forbidden("You are not part of this friendship"));
        }
        if friendship.status() == FriendshipStatus::Blocked {
            return Ok(friendship);
        }
        self.store(friendship.with_status(FriendshipStatus::Blocked))
            .await
    }

    /// Decline a pending request addressed to `actor`, deleting it.
    pub async fn decline(&self, id: &FriendshipId, actor: &UserId) -> Result<(), DomainError> {
        let friendship = self.load(id).await?;
        if friendship.addressee() != actor {
            return Err(DomainError::forbidden(
                "Only the recipient can decline this friend request",
            ));
        }
        if friendship.status() != FriendshipStatus::Pending {
            return Err(DomainError::conflict(format!(
                "This friend request is already {}",
                friendship.status()
            )));
        }
        self.delete(&friendship, "friend request declined").await
    }

    /// End an accepted friendship `actor` belongs to, deleting it.
    pub async fn remove(&self, id: &FriendshipId, actor: &UserId) -> Result<(), DomainError> {
        let friendship = self.load(id).await?;
        if !friendship.involves(actor) {
            return Err(DomainError::forbidden("You are not part of this friendship"));
        }
        if friendship.status() != FriendshipStatus::Accepted {
            return Err(DomainError::conflict(format!(
                "Only accepted friendships can be removed; this one is {}",
                friendship.status()
            )));
        }
        self.delete(&friendship, "friendship removed").await
    }

    /// Accepted friendships on either side.
    pub async fn friends_of(&self, user: &UserId) -> Result<Vec<Connection>, DomainError> {
        self.connections(user, |friendship| {
            friendship.status() == FriendshipStatus::Accepted
        })
        .await
    }

    /// Pending requests addressed to `user`.
    pub async fn incoming(&self, user: &UserId) -> Result<Vec<Connection>, DomainError> {
        self.connections(user, |friendship| {
            friendship.status() == FriendshipStatus::Pending && friendship.addressee() == user
        })
        .await
    }

    /// Peers whose name or email contains `query`, ignoring case.
    ///
    /// A blank query matches nothing. `exclude` is left out of the results.
    pub async fn search(&self, query: &str, exclude: &UserId) -> Result<Vec<Peer>, DomainError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let peers = self.peers.peers().await.map_err(map_peer_error)?;
        Ok(peers
            .into_iter()
            .filter(|peer| peer.id != *exclude)
            .filter(|peer| {
                peer.display_name.to_lowercase().contains(&needle)
                    || peer.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    async fn connections(
        &self,
        user: &UserId,
        keep: impl Fn(&Friendship) -> bool,
    ) -> Result<Vec<Connection>, DomainError> {
        let friendships = self
            .friendships
            .list_involving(user)
            .await
            .map_err(map_friendship_error)?;
        let peers = self.peers.peers().await.map_err(map_peer_error)?;
        Ok(friendships
            .into_iter()
            .filter(|friendship| keep(friendship))
            .filter_map(|friendship| {
                let other = friendship.other_party(user)?.clone();
                let peer = peers.iter().find(|peer| peer.id == other).cloned();
                Some(Connection {
                    friendship,
                    other,
                    peer,
                })
            })
            .collect())
    }

    async fn load(&self, id: &FriendshipId) -> Result<Friendship, DomainError> {
        self.friendships
            .find(id)
            .await
            .map_err(map_friendship_error)?
            .ok_or_else(|| DomainError::not_found("Friend request not found"))
    }

    async fn store(&self, friendship: Friendship) -> Result<Friendship, DomainError> {
        let saved = self
            .friendships
            .save(&friendship)
            .await
            .map_err(map_friendship_error)?;
        if !saved {
            return Err(DomainError::not_found("Friend request not found"));
        }
        info!(
            friendship_id = %friendship.id(),
            status = %friendship.status(),
            "friendship updated"
        );
        Ok(friendship)
    }

    async fn delete(
        &self,
        friendship: &Friendship,
        action: &'static str,
    ) -> Result<(), DomainError> {
        let deleted = self
            .friendships
            .delete(&friendship.id())
            .await
            .map_err(map_friendship_error)?;
        if !deleted {
            return Err(DomainError::not_found("Friend request not found"));
        }
        info!(friendship_id = %friendship.id(), action, "friendship deleted");
        Ok(())
    }
}

pub(crate) fn map_friendship_error(error: FriendshipRepositoryError) -> DomainError {
    match error {
        FriendshipRepositoryError::Storage { message } => {
            DomainError::service_unavailable(format!("friendship storage unavailable: {message}"))
        }
    }
}
