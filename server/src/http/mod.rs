use crate::transport::AppState;
use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use std::sync::Arc;

/// `GET /` — a trivial liveness probe.
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    peers: usize,
    waiting: usize,
    rooms_total: usize,
    rooms_connected: usize,
    rooms_pending: usize,
    max_peers: usize,
    max_rooms: usize,
    load_percent: f64,
    room_utilization_percent: f64,
}

/// `GET /status` — a read-only snapshot of the engine's current load.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let stats = state.engine.stats().await.unwrap_or_default();
    Json(StatusResponse {
        peers: stats.peers,
        waiting: stats.waiting,
        rooms_total: stats.rooms_total,
        rooms_connected: stats.rooms_connected,
        rooms_pending: stats.rooms_pending,
        max_peers: stats.max_peers,
        max_rooms: stats.max_rooms,
        load_percent: stats.load_percent(),
        room_utilization_percent: stats.room_utilization_percent(),
    })
}
