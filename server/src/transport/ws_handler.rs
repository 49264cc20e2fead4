use crate::engine::EngineHandle;
use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use paircast_core::{ClientEvent, PeerId, ServerEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Shared state reachable by every axum handler: the outbound signaling sink
/// and a handle into the matchmaking engine.
#[derive(Clone)]
pub struct AppState {
    pub signaling: SignalingService,
    pub engine: EngineHandle,
}

/// Upgrades an HTTP connection to a WebSocket and assigns the connecting
/// client a fresh [`PeerId`] — identity is minted server-side, never
/// supplied by the client, so there is nothing to validate or collide on.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let peer_id = PeerId::new();
    ws.on_upgrade(move |socket| handle_socket(socket, peer_id, state))
}

async fn handle_socket(socket: WebSocket, peer_id: PeerId, state: Arc<AppState>) {
    info!(?peer_id, "peer connected");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();
    state.signaling.add_peer(peer_id, tx);

    let ice_servers = state.signaling.ice_servers();
    if !ice_servers.is_empty() {
        state.signaling.send(peer_id, ServerEvent::IceConfig { ice_servers }).await;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_tx.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let state = state.clone();
        async move {
            while let Some(Ok(msg)) = ws_rx.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => dispatch(&state, peer_id, event).await,
                        Err(err) => warn!(?peer_id, %err, "dropping unparseable event"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    state.engine.remove(peer_id).await;
    state.signaling.remove_peer(&peer_id);
    info!(?peer_id, "peer disconnected");
}

async fn dispatch(state: &Arc<AppState>, peer_id: PeerId, event: ClientEvent) {
    match event {
        ClientEvent::Join { name } => state.engine.admit(peer_id, name).await,
        ClientEvent::Next => state.engine.next(peer_id).await,
        ClientEvent::ReadyForNew => state.engine.enqueue(peer_id).await,
        ClientEvent::Offer { room_id, sdp } => state.engine.offer(peer_id, room_id, sdp).await,
        ClientEvent::Answer { room_id, sdp } => state.engine.answer(peer_id, room_id, sdp).await,
        ClientEvent::AddIceCandidate {
            room_id,
            candidate,
            kind,
        } => state.engine.ice_candidate(peer_id, room_id, candidate, kind).await,
        ClientEvent::ConnectionEstablished { room_id } => {
            state.engine.connection_established(peer_id, room_id).await
        }
        ClientEvent::ManualDisconnect => state.engine.remove(peer_id).await,
    }
}
