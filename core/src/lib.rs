mod model;

pub use model::{ClientEvent, IceServerConfig, PeerId, RoomId, ServerEvent};
