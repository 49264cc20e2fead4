use super::actor::Engine;
use super::command::{EngineCommand, EngineStats};
use crate::signaling::SignalingOutput;
use paircast_core::{PeerId, RoomId};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

/// Clonable front for the engine actor. Every public operation turns into one
/// `EngineCommand` pushed onto the actor's queue; callers that don't need a
/// reply fire-and-forget, `stats` is the one operation that waits on a
/// `oneshot` for its snapshot.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the engine actor task and returns a handle to it. The channel
    /// capacity bounds how many in-flight commands a burst of connecting
    /// peers can queue before transport tasks start backpressuring.
    pub fn spawn(
        max_peers: usize,
        max_rooms: usize,
        max_attempts: u32,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        let (tx, rx) = mpsc::channel(1024);
        let engine = Engine::new(max_peers, max_rooms, max_attempts, signaling, rx);
        tokio::spawn(engine.run());
        Self { tx }
    }

    async fn dispatch(&self, cmd: EngineCommand) {
        if self.tx.send(cmd).await.is_err() {
            tracing::error!("engine actor is gone; dropping command");
        }
    }

    pub async fn admit(&self, peer_id: PeerId, name: String) {
        self.dispatch(EngineCommand::Admit { peer_id, name }).await;
    }

    pub async fn enqueue(&self, peer_id: PeerId) {
        self.dispatch(EngineCommand::Enqueue { peer_id }).await;
    }

    pub async fn next(&self, peer_id: PeerId) {
        self.dispatch(EngineCommand::Next { peer_id }).await;
    }

    pub async fn remove(&self, peer_id: PeerId) {
        self.dispatch(EngineCommand::Remove { peer_id }).await;
    }

    pub async fn offer(&self, peer_id: PeerId, room_id: RoomId, sdp: String) {
        self.dispatch(EngineCommand::Offer { peer_id, room_id, sdp }).await;
    }

    pub async fn answer(&self, peer_id: PeerId, room_id: RoomId, sdp: String) {
        self.dispatch(EngineCommand::Answer { peer_id, room_id, sdp }).await;
    }

    pub async fn ice_candidate(&self, peer_id: PeerId, room_id: RoomId, candidate: String, kind: String) {
        self.dispatch(EngineCommand::IceCandidate {
            peer_id,
            room_id,
            candidate,
            kind,
        })
        .await;
    }

    pub async fn connection_established(&self, peer_id: PeerId, room_id: RoomId) {
        self.dispatch(EngineCommand::ConnectionEstablished { peer_id, room_id }).await;
    }

    pub async fn reap_inactive(&self, now: Instant, timeout: Duration) {
        self.dispatch(EngineCommand::ReapInactive { now, timeout }).await;
    }

    pub async fn reap_stale(&self, now: Instant, timeout: Duration) {
        self.dispatch(EngineCommand::ReapStale { now, timeout }).await;
    }

    pub async fn stats(&self) -> Option<EngineStats> {
        let (reply, rx) = oneshot::channel();
        self.dispatch(EngineCommand::Stats { reply }).await;
        rx.await.ok()
    }
}
