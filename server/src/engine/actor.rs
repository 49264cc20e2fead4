use super::command::{EngineCommand, EngineStats};
use super::peer::Peer;
use super::room::Room;
use crate::signaling::SignalingOutput;
use paircast_core::{PeerId, RoomId};
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The matchmaking & signaling engine: the concurrent state machine that
/// owns the peer directory, the FIFO waiting queue and the set of active
/// rooms, and routes signaling between paired peers. It is driven off a
/// single mpsc queue of [`EngineCommand`]s — commands are processed one at a
/// time, which gives the whole core exclusive access to its state without an
/// explicit `Mutex`.
pub struct Engine {
    pub(super) directory: HashMap<PeerId, Peer>,
    pub(super) queue: VecDeque<PeerId>,
    pub(super) rooms: HashMap<RoomId, Room>,
    pub(super) peer_room: HashMap<PeerId, RoomId>,
    pub(super) max_peers: usize,
    pub(super) max_rooms: usize,
    pub(super) max_attempts: u32,
    pub(super) signaling: Arc<dyn SignalingOutput>,
    command_rx: mpsc::Receiver<EngineCommand>,
}

impl Engine {
    pub fn new(
        max_peers: usize,
        max_rooms: usize,
        max_attempts: u32,
        signaling: Arc<dyn SignalingOutput>,
        command_rx: mpsc::Receiver<EngineCommand>,
    ) -> Self {
        Self {
            directory: HashMap::new(),
            queue: VecDeque::new(),
            rooms: HashMap::new(),
            peer_room: HashMap::new(),
            max_peers,
            max_rooms,
            max_attempts,
            signaling,
            command_rx,
        }
    }

    pub async fn run(mut self) {
        info!("matchmaking engine started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }

        info!("matchmaking engine stopped");
    }

    async fn handle_command(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::Admit { peer_id, name } => self.admit(peer_id, name).await,
            EngineCommand::Enqueue { peer_id } => self.enqueue(peer_id).await,
            EngineCommand::Next { peer_id } => self.next(peer_id).await,
            EngineCommand::Remove { peer_id } => self.remove(peer_id).await,
            EngineCommand::Offer {
                peer_id,
                room_id,
                sdp,
            } => self.on_offer(peer_id, room_id, sdp).await,
            EngineCommand::Answer {
                peer_id,
                room_id,
                sdp,
            } => self.on_answer(peer_id, room_id, sdp).await,
            EngineCommand::IceCandidate {
                peer_id,
                room_id,
                candidate,
                kind,
            } => self.on_ice_candidate(peer_id, room_id, candidate, kind).await,
            EngineCommand::ConnectionEstablished { peer_id, room_id } => {
                self.on_connection_established(peer_id, room_id).await
            }
            EngineCommand::ReapInactive { now, timeout } => self.reap_inactive(now, timeout).await,
            EngineCommand::ReapStale { now, timeout } => self.reap_stale(now, timeout).await,
            EngineCommand::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
        }
    }

    /// Update a peer's last-activity timestamp. Called opportunistically
    /// from every relayed signaling event.
    pub(super) fn touch(&mut self, peer_id: PeerId) {
        if let Some(peer) = self.directory.get_mut(&peer_id) {
            peer.last_activity_at = Instant::now();
            debug!(?peer_id, "touched");
        }
    }

    fn stats(&self) -> EngineStats {
        let rooms_total = self.rooms.len();
        let rooms_connected = self.rooms.values().filter(|r| r.connected).count();
        EngineStats {
            peers: self.directory.len(),
            waiting: self.queue.len(),
            rooms_total,
            rooms_connected,
            rooms_pending: rooms_total - rooms_connected,
            max_peers: self.max_peers,
            max_rooms: self.max_rooms,
        }
    }
}
