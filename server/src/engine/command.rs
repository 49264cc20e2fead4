use paircast_core::{PeerId, RoomId};
use std::time::Instant;
use tokio::sync::oneshot;

/// A point-in-time snapshot of the engine's load, consumed by the HTTP
/// status endpoint and the housekeeper's monitoring sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineStats {
    pub peers: usize,
    pub waiting: usize,
    pub rooms_total: usize,
    pub rooms_connected: usize,
    pub rooms_pending: usize,
    pub max_peers: usize,
    pub max_rooms: usize,
}

impl EngineStats {
    pub fn load_percent(&self) -> f64 {
        if self.max_peers == 0 {
            0.0
        } else {
            self.peers as f64 / self.max_peers as f64 * 100.0
        }
    }

    pub fn room_utilization_percent(&self) -> f64 {
        if self.max_rooms == 0 {
            0.0
        } else {
            self.rooms_total as f64 / self.max_rooms as f64 * 100.0
        }
    }
}

/// Commands accepted by the matchmaking/signaling engine actor. Every
/// variant corresponds to one public operation on the engine; they're
/// processed one at a time off a single mpsc queue, which is what gives the
/// whole core its single-exclusive-lock semantics without an explicit
/// `Mutex`.
#[derive(Debug)]
pub enum EngineCommand {
    Admit { peer_id: PeerId, name: String },
    Enqueue { peer_id: PeerId },
    Next { peer_id: PeerId },
    Remove { peer_id: PeerId },
    Offer { peer_id: PeerId, room_id: RoomId, sdp: String },
    Answer { peer_id: PeerId, room_id: RoomId, sdp: String },
    IceCandidate {
        peer_id: PeerId,
        room_id: RoomId,
        candidate: String,
        kind: String,
    },
    ConnectionEstablished { peer_id: PeerId, room_id: RoomId },
    ReapInactive { now: Instant, timeout: std::time::Duration },
    ReapStale { now: Instant, timeout: std::time::Duration },
    Stats { reply: oneshot::Sender<EngineStats> },
}
