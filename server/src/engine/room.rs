use paircast_core::{PeerId, RoomId};
use std::time::Instant;

/// A two-party signaling session. `a` is always the offerer and `b` the
/// answerer — the asymmetry is what keeps the peers from racing each other
/// with simultaneous offers.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub a: PeerId,
    pub b: PeerId,
    pub created_at: Instant,
    pub offer_sent: bool,
    pub answer_sent: bool,
    pub connected: bool,
}

impl Room {
    pub fn new(id: RoomId, a: PeerId, b: PeerId, now: Instant) -> Self {
        Self {
            id,
            a,
            b,
            created_at: now,
            offer_sent: false,
            answer_sent: false,
            connected: false,
        }
    }

    /// The member that is not `peer`, or `None` if `peer` isn't in this room.
    pub fn other(&self, peer: PeerId) -> Option<PeerId> {
        if self.a == peer {
            Some(self.b)
        } else if self.b == peer {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn contains(&self, peer: PeerId) -> bool {
        self.a == peer || self.b == peer
    }
}
