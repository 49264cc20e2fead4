use super::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use paircast_core::{IceServerConfig, PeerId, ServerEvent};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// Concrete [`SignalingOutput`]: keeps one outbound WebSocket sink per
/// connected peer and serializes every [`ServerEvent`] onto it. Registration
/// happens from the transport layer as sockets open and close; `dashmap` lets
/// that churn happen concurrently with the engine actor's own single-threaded
/// event loop without a shared lock.
#[derive(Clone)]
pub struct SignalingService {
    peers: std::sync::Arc<DashMap<PeerId, mpsc::UnboundedSender<Message>>>,
    ice_servers: std::sync::Arc<Vec<IceServerConfig>>,
}

impl SignalingService {
    pub fn new(ice_servers: Vec<IceServerConfig>) -> Self {
        Self {
            peers: std::sync::Arc::new(DashMap::new()),
            ice_servers: std::sync::Arc::new(ice_servers),
        }
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.ice_servers.as_ref().clone()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send(&self, peer_id: PeerId, event: ServerEvent) {
        let Some(sink) = self.peers.get(&peer_id) else {
            warn!(?peer_id, "attempted to send to a disconnected peer");
            return;
        };

        match serde_json::to_string(&event) {
            Ok(json) => {
                if let Err(err) = sink.send(Message::Text(json.into())) {
                    error!(?peer_id, %err, "failed to push outbound signal");
                }
            }
            Err(err) => error!(?peer_id, %err, "failed to serialize outbound signal"),
        }
    }
}
