mod common;

use common::spawn_default_engine;
use paircast_core::{PeerId, ServerEvent};
use std::time::Duration;

/// S1 — two admitted peers are paired in FIFO order: the earlier arrival
/// becomes the offerer.
#[tokio::test]
async fn basic_pairing_assigns_offerer_and_answerer_in_arrival_order() {
    common::init_tracing();
    let (engine, signaling) = spawn_default_engine();
    let (a, b) = (PeerId::new(), PeerId::new());

    engine.admit(a, "alice".into()).await;
    engine.admit(b, "bob".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let a_events = signaling.events_for(a).await;
    let b_events = signaling.events_for(b).await;

    assert!(a_events.contains(&ServerEvent::Lobby));
    assert!(b_events.contains(&ServerEvent::Lobby));

    let send_offer = a_events
        .iter()
        .find_map(|e| match e {
            ServerEvent::SendOffer { room_id, partner_name } => Some((*room_id, partner_name.clone())),
            _ => None,
        })
        .expect("A should have received send-offer");
    assert_eq!(send_offer.1, "bob");

    let wait_offer = b_events
        .iter()
        .find_map(|e| match e {
            ServerEvent::WaitOffer { room_id, partner_name } => Some((*room_id, partner_name.clone())),
            _ => None,
        })
        .expect("B should have received wait-offer");
    assert_eq!(wait_offer.1, "alice");
    assert_eq!(send_offer.0, wait_offer.0, "both peers should share one room");
}

/// S6 — capacity rejection: the second peer is refused and never reaches the
/// directory.
#[tokio::test]
async fn admit_rejects_when_at_capacity() {
    common::init_tracing();
    let (engine, signaling) = common::spawn_test_engine(1, 100, 3);

    let a = PeerId::new();
    let b = PeerId::new();
    engine.admit(a, "a".into()).await;
    engine.admit(b, "b".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let b_events = signaling.events_for(b).await;
    let rejected = b_events
        .iter()
        .any(|e| matches!(e, ServerEvent::Error { message } if message.contains("capacity")));
    assert!(rejected, "B should have been rejected for capacity: {:?}", b_events);

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.peers, 1, "only A should be admitted");
}

/// A duplicate `join` from an already-admitted peer id is rejected with an
/// error, not silently accepted a second time.
#[tokio::test]
async fn admit_rejects_duplicate_join() {
    common::init_tracing();
    let (engine, signaling) = spawn_default_engine();
    let a = PeerId::new();

    engine.admit(a, "alice".into()).await;
    engine.admit(a, "alice-again".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let events = signaling.events_for(a).await;
    let errors = events.iter().filter(|e| matches!(e, ServerEvent::Error { .. })).count();
    assert_eq!(errors, 1);

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.peers, 1);
}

/// Three peers: the first two pair immediately, the third waits alone.
#[tokio::test]
async fn third_peer_waits_when_queue_is_odd() {
    common::init_tracing();
    let (engine, signaling) = spawn_default_engine();
    let (a, b, c) = (PeerId::new(), PeerId::new(), PeerId::new());

    engine.admit(a, "a".into()).await;
    engine.admit(b, "b".into()).await;
    engine.admit(c, "c".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.peers, 3);
    assert_eq!(stats.rooms_total, 1);
    assert_eq!(stats.waiting, 1);

    let c_events = signaling.events_for(c).await;
    assert!(c_events.contains(&ServerEvent::Lobby));
    assert!(!c_events.iter().any(|e| matches!(e, ServerEvent::SendOffer { .. } | ServerEvent::WaitOffer { .. })));
}

/// A peer that departs (transport drop) while still only half-paired with a
/// FIFO partner must not leave an orphaned id stuck at the head of the queue
/// blocking everyone else (pairing step 2 self-heals).
#[tokio::test]
async fn pairing_skips_orphaned_queue_entries() {
    common::init_tracing();
    let (engine, signaling) = spawn_default_engine();
    let (a, b, c) = (PeerId::new(), PeerId::new(), PeerId::new());

    engine.admit(a, "a".into()).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    // A leaves again before anyone else arrives: back to an empty queue.
    engine.remove(a).await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    engine.admit(b, "b".into()).await;
    engine.admit(c, "c".into()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.peers, 2);
    assert_eq!(stats.rooms_total, 1);

    let b_events = signaling.events_for(b).await;
    assert!(b_events.iter().any(|e| matches!(e, ServerEvent::SendOffer { .. })));
}
