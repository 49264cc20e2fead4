use paircast_core::IceServerConfig;
use std::time::Duration;

/// Runtime configuration, loaded from the environment with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_peers: usize,
    pub max_rooms: usize,
    pub max_attempts: u32,
    pub user_timeout: Duration,
    pub connection_timeout: Duration,
    pub cleanup_interval: Duration,
    pub monitoring_interval: Duration,
    pub port: u16,
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_peers: 200,
            max_rooms: 100,
            max_attempts: 3,
            user_timeout: Duration::from_secs(300),
            connection_timeout: Duration::from_secs(30),
            cleanup_interval: Duration::from_secs(60),
            monitoring_interval: Duration::from_secs(30),
            port: 8080,
            ice_servers: default_ice_servers(),
        }
    }
}

impl Config {
    /// Reads overrides from the environment, falling back to the defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_peers: env_or("MAX_PEERS", defaults.max_peers),
            max_rooms: env_or("MAX_ROOMS", defaults.max_rooms),
            max_attempts: env_or("MAX_ATTEMPTS", defaults.max_attempts),
            user_timeout: env_secs_or("USER_TIMEOUT_SEC", defaults.user_timeout),
            connection_timeout: env_secs_or("CONNECTION_TIMEOUT_SEC", defaults.connection_timeout),
            cleanup_interval: env_secs_or("CLEANUP_INTERVAL_SEC", defaults.cleanup_interval),
            monitoring_interval: env_secs_or("MONITORING_INTERVAL_SEC", defaults.monitoring_interval),
            port: env_or("PORT", defaults.port),
            ice_servers: defaults.ice_servers,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn env_secs_or(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

/// STUN-only defaults, pushed to every connecting peer as an `ice-config`
/// event before any signaling begins.
fn default_ice_servers() -> Vec<IceServerConfig> {
    [
        "stun:stun.l.google.com:19302",
        "stun:stun1.l.google.com:19302",
        "stun:stun2.l.google.com:19302",
        "stun:stun3.l.google.com:19302",
        "stun:stun4.l.google.com:19302",
    ]
    .into_iter()
    .map(|url| IceServerConfig {
        urls: vec![url.to_string()],
        username: None,
        credential: None,
    })
    .collect()
}
