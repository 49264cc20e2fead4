use super::actor::Engine;
use super::peer::{Peer, PeerState};
use paircast_core::{PeerId, ServerEvent};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

impl Engine {
    /// Admits a newly connected peer into the pool. Rejects a duplicate join
    /// or a server at capacity with an `error` event instead of a return
    /// value — there is no synchronous reply channel for this operation,
    /// only the outbound signaling stream.
    pub(super) async fn admit(&mut self, peer_id: PeerId, name: String) {
        if self.directory.contains_key(&peer_id) {
            self.signaling
                .send(
                    peer_id,
                    ServerEvent::Error {
                        message: "already joined".into(),
                    },
                )
                .await;
            return;
        }

        if self.directory.len() >= self.max_peers || self.rooms.len() >= self.max_rooms {
            warn!(peers = self.directory.len(), rooms = self.rooms.len(), "rejecting admit: at capacity");
            self.signaling
                .send(
                    peer_id,
                    ServerEvent::Error {
                        message: "server at capacity".into(),
                    },
                )
                .await;
            return;
        }

        let now = Instant::now();
        self.directory.insert(peer_id, Peer::new(peer_id, name, now));
        self.queue.push_back(peer_id);
        debug!(?peer_id, "admitted");

        self.signaling.send(peer_id, ServerEvent::Lobby).await;
        self.pair().await;
    }

    /// Re-enters a peer into the waiting pool. Only effective for a peer
    /// sitting `Idle` (e.g. after a stale-room reap); no-op for an absent,
    /// already-waiting or paired peer.
    pub(super) async fn enqueue(&mut self, peer_id: PeerId) {
        let Some(peer) = self.directory.get_mut(&peer_id) else {
            return;
        };
        if peer.state != PeerState::Idle {
            return;
        }
        peer.state = PeerState::Waiting;
        peer.attempts = 0;
        peer.last_activity_at = Instant::now();
        self.queue.push_back(peer_id);

        self.signaling.send(peer_id, ServerEvent::Lobby).await;
        self.pair().await;
    }

    /// Tears down a peer's current room and sends both parties back to the
    /// queue. No-op unless `peer_id` is currently paired.
    pub(super) async fn next(&mut self, peer_id: PeerId) {
        let Some(partner) = self.handle_peer_disconnect(peer_id).await else {
            return;
        };

        let now = Instant::now();
        for id in [peer_id, partner] {
            if let Some(peer) = self.directory.get_mut(&id) {
                peer.state = PeerState::Waiting;
                peer.attempts = 0;
                peer.last_activity_at = now;
            }
        }
        self.queue.push_back(peer_id);
        self.queue.push_back(partner);

        self.pair().await;
    }

    /// Tears down any room the peer was in, re-enqueues the partner, drops
    /// the peer from the directory and queue, and re-runs pairing. Used for
    /// both explicit `manual-disconnect` and transport close.
    pub(super) async fn remove(&mut self, peer_id: PeerId) {
        if let Some(partner) = self.handle_peer_disconnect(peer_id).await {
            if let Some(peer) = self.directory.get_mut(&partner) {
                peer.state = PeerState::Waiting;
                peer.attempts = 0;
                peer.last_activity_at = Instant::now();
            }
            self.queue.push_back(partner);
        }

        self.directory.remove(&peer_id);
        self.queue.retain(|id| *id != peer_id);
        self.peer_room.remove(&peer_id);
        debug!(?peer_id, "removed");

        self.pair().await;
    }

    /// Drops every peer whose last activity is older than `timeout`, as if
    /// it had disconnected.
    pub(super) async fn reap_inactive(&mut self, now: Instant, timeout: Duration) {
        let stale: Vec<PeerId> = self
            .directory
            .iter()
            .filter(|(_, peer)| now.saturating_duration_since(peer.last_activity_at) > timeout)
            .map(|(id, _)| *id)
            .collect();

        if !stale.is_empty() {
            warn!(count = stale.len(), "reaping inactive peers");
        }
        for peer_id in stale {
            self.remove(peer_id).await;
        }
    }

    /// Repeatedly tries to match the two peers at the head of the queue;
    /// re-runs after every admission, re-enqueue, and departure. `budget` is
    /// a defensive termination backstop, insurance against a pathological
    /// tie between two peers that are simultaneously at `MaxAttempts`.
    pub(super) async fn pair(&mut self) {
        let mut budget = self.queue.len().saturating_mul(2).max(4);

        loop {
            if budget == 0 || self.queue.len() < 2 {
                break;
            }
            budget -= 1;

            let id1 = self.queue.pop_front().unwrap();
            let id2 = self.queue.pop_front().unwrap();

            let has1 = self.directory.contains_key(&id1);
            let has2 = self.directory.contains_key(&id2);
            if !has1 && !has2 {
                continue;
            }
            if !has1 {
                self.queue.push_front(id2);
                continue;
            }
            if !has2 {
                self.queue.push_front(id1);
                continue;
            }

            let waiting1 = self.directory[&id1].state == PeerState::Waiting;
            let waiting2 = self.directory[&id2].state == PeerState::Waiting;
            if !waiting1 || !waiting2 {
                self.queue.push_front(id2);
                self.queue.push_front(id1);
                break;
            }

            let over1 = self.directory[&id1].attempts >= self.max_attempts;
            let over2 = self.directory[&id2].attempts >= self.max_attempts;
            if over1 || over2 {
                if over1 {
                    self.queue.push_back(id1);
                } else {
                    self.queue.push_front(id1);
                }
                if over2 {
                    self.queue.push_back(id2);
                } else {
                    self.queue.push_front(id2);
                }
                continue;
            }

            if let Some(peer) = self.directory.get_mut(&id1) {
                peer.state = PeerState::Paired;
                peer.attempts += 1;
            }
            if let Some(peer) = self.directory.get_mut(&id2) {
                peer.state = PeerState::Paired;
                peer.attempts += 1;
            }
            self.create_room(id1, id2).await;
        }
    }
}
