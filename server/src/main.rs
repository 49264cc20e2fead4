use anyhow::Result;
use axum::routing::get;
use axum::Router;
use paircast_server::{housekeeper, ws_handler, AppState, Config, EngineHandle, SignalingService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    info!(?config, "starting signaling server");

    let signaling = SignalingService::new(config.ice_servers.clone());
    let engine = EngineHandle::spawn(
        config.max_peers,
        config.max_rooms,
        config.max_attempts,
        Arc::new(signaling.clone()),
    );

    housekeeper::spawn(engine.clone(), config.clone());

    let state = Arc::new(AppState { signaling, engine });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    let app = Router::new()
        .route("/", get(paircast_server::http::liveness))
        .route("/status", get(paircast_server::http::status))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("signaling server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
