use crate::model::member::MemberInfo;
use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// Events a client sends to the signaling server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinRoom {
        room: String,
        #[serde(default)]
        display_name: Option<String>,
    },
    LeaveRoom,
    /// `payload` is opaque to the server and delivered verbatim.
    Relay {
        to: PeerId,
        payload: serde_json::Value,
    },
    Rename {
        name: String,
    },
    ToggleLock,
    Chat {
        text: String,
    },
}

/// Events the signaling server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    Welcome {
        peer_id: PeerId,
    },
    IceConfig {
        ice_servers: Vec<IceServerConfig>,
    },
    Joined {
        room: String,
        assigned_name: String,
        /// Everyone already in the room, joiner excluded, in join order.
        members: Vec<MemberInfo>,
        locked: bool,
        host_id: PeerId,
    },
    PeerJoined(MemberInfo),
    PeerLeft {
        id: PeerId,
    },
    RejectedFull {
        room: String,
    },
    RejectedLocked {
        room: String,
    },
    RoomClosed {
        reason: String,
    },
    LockChanged {
        locked: bool,
    },
    Renamed {
        peer_id: PeerId,
        new_name: String,
    },
    HostChanged {
        host_id: PeerId,
    },
    Relay {
        from: PeerId,
        payload: serde_json::Value,
    },
    Chat {
        sender_id: PeerId,
        sender_name: String,
        text: String,
    },
}
