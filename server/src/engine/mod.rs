mod actor;
mod command;
mod handle;
mod matchmaker;
mod peer;
mod registry;
mod room;

pub use command::EngineStats;
pub use handle::EngineHandle;
pub use peer::PeerState;
