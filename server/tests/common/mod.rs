pub mod mock_signaling;

pub use mock_signaling::MockSignalingOutput;

use paircast_core::{PeerId, RoomId, ServerEvent};
use paircast_server::EngineHandle;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Spins up an engine actor with the given limits, wired to a capturing mock
/// signaling output, and returns both so a test can drive commands and
/// inspect what went out.
pub fn spawn_test_engine(
    max_peers: usize,
    max_rooms: usize,
    max_attempts: u32,
) -> (EngineHandle, MockSignalingOutput) {
    let (signaling, _rx) = MockSignalingOutput::new();
    let engine = EngineHandle::spawn(max_peers, max_rooms, max_attempts, Arc::new(signaling.clone()));
    (engine, signaling)
}

/// Default-capacity variant for tests that don't care about limits.
pub fn spawn_default_engine() -> (EngineHandle, MockSignalingOutput) {
    spawn_test_engine(200, 100, 3)
}

/// Admits two peers and waits for them to be matched, returning their ids and
/// the room they were placed in.
pub async fn pair_two(engine: &EngineHandle, signaling: &MockSignalingOutput) -> (PeerId, PeerId, RoomId) {
    let a = PeerId::new();
    let b = PeerId::new();
    engine.admit(a, "a".into()).await;
    engine.admit(b, "b".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let room_id = signaling
        .events_for(a)
        .await
        .into_iter()
        .find_map(|e| match e {
            ServerEvent::SendOffer { room_id, .. } => Some(room_id),
            _ => None,
        })
        .expect("A and B should have been paired into a room");

    (a, b, room_id)
}
