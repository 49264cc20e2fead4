use paircast_core::PeerId;
use std::time::Instant;

/// Where a peer currently sits in the matchmaking lifecycle.
///
/// `queue membership ⇔ state == Waiting`; `room membership ⇔ state == Paired`.
/// `Idle` covers an admitted peer that is in neither — e.g. right after a
/// stale-room reap, before it asks to re-enter the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    Idle,
    Waiting,
    Paired,
}

#[derive(Debug, Clone)]
pub struct Peer {
    pub id: PeerId,
    pub name: String,
    pub state: PeerState,
    pub created_at: Instant,
    pub last_activity_at: Instant,
    /// Number of times this peer has been promoted Waiting -> Paired since
    /// its last reset. Reset to zero whenever the peer re-enters Waiting.
    pub attempts: u32,
}

impl Peer {
    pub fn new(id: PeerId, name: String, now: Instant) -> Self {
        Self {
            id,
            name,
            state: PeerState::Waiting,
            created_at: now,
            last_activity_at: now,
            attempts: 0,
        }
    }
}
