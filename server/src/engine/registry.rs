use super::actor::Engine;
use super::room::Room;
use paircast_core::{PeerId, RoomId, ServerEvent};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

impl Engine {
    /// Opens a room between two peers. Assigns `a` as offerer and `b` as
    /// answerer and tells each who to expect — the asymmetry is what avoids
    /// two peers racing each other with simultaneous offers.
    pub(super) async fn create_room(&mut self, a: PeerId, b: PeerId) -> RoomId {
        let id = RoomId::new();
        let now = Instant::now();
        self.rooms.insert(id, Room::new(id, a, b, now));
        self.peer_room.insert(a, id);
        self.peer_room.insert(b, id);
        debug!(?id, offerer = ?a, answerer = ?b, "room created");

        let a_name = self.directory.get(&a).map(|p| p.name.clone()).unwrap_or_default();
        let b_name = self.directory.get(&b).map(|p| p.name.clone()).unwrap_or_default();

        self.signaling
            .send(
                a,
                ServerEvent::SendOffer {
                    room_id: id,
                    partner_name: b_name,
                },
            )
            .await;
        self.signaling
            .send(
                b,
                ServerEvent::WaitOffer {
                    room_id: id,
                    partner_name: a_name,
                },
            )
            .await;

        id
    }

    /// Relays an offer to the sender's partner. Dropped silently if the room
    /// is gone or the sender isn't a member — a departed partner can still
    /// have an offer in flight from before it left.
    pub(super) async fn on_offer(&mut self, sender: PeerId, room_id: RoomId, sdp: String) {
        self.touch(sender);
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };
        let Some(recipient) = room.other(sender) else {
            return;
        };
        room.offer_sent = true;
        self.signaling.send(recipient, ServerEvent::Offer { room_id, sdp }).await;
    }

    /// Relays an answer to the sender's partner. Symmetric with `on_offer`.
    pub(super) async fn on_answer(&mut self, sender: PeerId, room_id: RoomId, sdp: String) {
        self.touch(sender);
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };
        let Some(recipient) = room.other(sender) else {
            return;
        };
        room.answer_sent = true;
        self.signaling.send(recipient, ServerEvent::Answer { room_id, sdp }).await;
    }

    /// Relays an ICE candidate to the sender's partner. Pure relay; no room
    /// state mutation beyond the activity touch.
    pub(super) async fn on_ice_candidate(
        &mut self,
        sender: PeerId,
        room_id: RoomId,
        candidate: String,
        kind: String,
    ) {
        self.touch(sender);
        let Some(room) = self.rooms.get(&room_id) else {
            return;
        };
        let Some(recipient) = room.other(sender) else {
            return;
        };
        self.signaling
            .send(recipient, ServerEvent::AddIceCandidate { candidate, kind })
            .await;
    }

    /// Marks a room connected so the stale reaper leaves it alone; produces
    /// no outbound event of its own.
    pub(super) async fn on_connection_established(&mut self, sender: PeerId, room_id: RoomId) {
        self.touch(sender);
        if let Some(room) = self.rooms.get_mut(&room_id) {
            if room.contains(sender) {
                room.connected = true;
                debug!(?room_id, "connection established");
            }
        }
    }

    /// Destroys every room that never confirmed a connection within
    /// `timeout` of creation. Its peers land in `Idle`, not back in the
    /// queue — they must ask to re-enter via `ready-for-new`.
    pub(super) async fn reap_stale(&mut self, now: Instant, timeout: Duration) {
        let stale: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|(_, room)| !room.connected && now.saturating_duration_since(room.created_at) > timeout)
            .map(|(id, _)| *id)
            .collect();

        if !stale.is_empty() {
            warn!(count = stale.len(), "reaping stale rooms");
        }

        for room_id in stale {
            let Some(room) = self.rooms.remove(&room_id) else {
                continue;
            };
            self.peer_room.remove(&room.a);
            self.peer_room.remove(&room.b);
            for id in [room.a, room.b] {
                if let Some(peer) = self.directory.get_mut(&id) {
                    peer.state = super::peer::PeerState::Idle;
                }
                self.signaling.send(id, ServerEvent::ConnectionTimeout).await;
            }
        }
    }

    /// Shared by `next` and `remove`: if the peer is in a room, destroys it
    /// and notifies the partner, returning the partner's id; otherwise a
    /// no-op.
    pub(super) async fn handle_peer_disconnect(&mut self, peer_id: PeerId) -> Option<PeerId> {
        let room_id = *self.peer_room.get(&peer_id)?;
        let room = self.rooms.remove(&room_id)?;
        self.peer_room.remove(&room.a);
        self.peer_room.remove(&room.b);
        let partner = room.other(peer_id)?;
        self.signaling.send(partner, ServerEvent::PartnerDisconnected).await;
        Some(partner)
    }
}
