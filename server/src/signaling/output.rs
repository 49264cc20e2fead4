use async_trait::async_trait;
use paircast_core::{PeerId, ServerEvent};

/// The interface the engine uses to push a signaling message out to a peer.
/// Implemented by [`crate::signaling::SignalingService`]; a test double can
/// swap in to capture emissions instead of touching a real socket.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, peer_id: PeerId, event: ServerEvent);
}
