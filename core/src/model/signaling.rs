use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

/// Messages a peer sends to the server over the signaling channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    Join {
        name: String,
    },
    Next,
    ReadyForNew,
    Offer {
        room_id: RoomId,
        sdp: String,
    },
    Answer {
        room_id: RoomId,
        sdp: String,
    },
    AddIceCandidate {
        room_id: RoomId,
        candidate: String,
        #[serde(rename = "type")]
        kind: String,
    },
    ConnectionEstablished {
        room_id: RoomId,
    },
    ManualDisconnect,
}

/// Messages the server sends to a peer over the signaling channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Pushed immediately on connect so the client's RTCPeerConnection can be
    /// configured with STUN/TURN servers before it ever needs to gather
    /// candidates.
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    Lobby,
    SendOffer {
        room_id: RoomId,
        partner_name: String,
    },
    WaitOffer {
        room_id: RoomId,
        partner_name: String,
    },
    Offer {
        room_id: RoomId,
        sdp: String,
    },
    Answer {
        room_id: RoomId,
        sdp: String,
    },
    AddIceCandidate {
        candidate: String,
        #[serde(rename = "type")]
        kind: String,
    },
    PartnerDisconnected,
    ConnectionTimeout,
    Error {
        message: String,
    },
}
