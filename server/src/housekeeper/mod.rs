use crate::config::Config;
use crate::engine::EngineHandle;
use std::time::Instant;
use tracing::warn;

/// Spawns the periodic cleanup sweep and the monitoring tick. Each cleanup
/// tick reaps inactive peers first, then stale rooms, on the same timer and
/// in that order, so the two sweeps never race each other into the engine.
pub fn spawn(engine: EngineHandle, config: Config) {
    spawn_cleanup_sweep(engine.clone(), &config);
    spawn_monitor(engine, config);
}

fn spawn_cleanup_sweep(engine: EngineHandle, config: &Config) {
    let period = config.cleanup_interval;
    let user_timeout = config.user_timeout;
    let connection_timeout = config.connection_timeout;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let now = Instant::now();
            engine.reap_inactive(now, user_timeout).await;
            engine.reap_stale(now, connection_timeout).await;
        }
    });
}

fn spawn_monitor(engine: EngineHandle, config: Config) {
    let period = config.monitoring_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let Some(stats) = engine.stats().await else {
                continue;
            };
            let load = stats.load_percent();
            if load >= 80.0 {
                warn!(
                    peers = stats.peers,
                    max_peers = config.max_peers,
                    load_percent = load,
                    "peer load above 80%"
                );
            } else {
                tracing::debug!(
                    peers = stats.peers,
                    waiting = stats.waiting,
                    rooms = stats.rooms_total,
                    "monitoring tick"
                );
            }
        }
    });
}
