pub mod config;
pub mod engine;
pub mod housekeeper;
pub mod http;
pub mod signaling;
pub mod transport;

pub use config::Config;
pub use engine::EngineHandle;
pub use signaling::{SignalingOutput, SignalingService};
pub use transport::{ws_handler, AppState};
