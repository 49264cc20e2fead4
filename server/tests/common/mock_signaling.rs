use async_trait::async_trait;
use paircast_core::{PeerId, ServerEvent};
use paircast_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Captures every event the engine pushes out, keyed by recipient, instead of
/// writing to a real socket. Tests can either drain the unbounded channel in
/// order or inspect the full capture log after the fact.
#[derive(Clone)]
pub struct MockSignalingOutput {
    tx: mpsc::UnboundedSender<(PeerId, ServerEvent)>,
    log: Arc<Mutex<Vec<(PeerId, ServerEvent)>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(PeerId, ServerEvent)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                log: Arc::new(Mutex::new(Vec::new())),
            },
            rx,
        )
    }

    pub async fn events_for(&self, peer_id: PeerId) -> Vec<ServerEvent> {
        self.log
            .lock()
            .await
            .iter()
            .filter(|(id, _)| *id == peer_id)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send(&self, peer_id: PeerId, event: ServerEvent) {
        self.log.lock().await.push((peer_id, event.clone()));
        let _ = self.tx.send((peer_id, event));
    }
}
