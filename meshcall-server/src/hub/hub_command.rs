use meshcall_core::PeerId;
use tokio::sync::oneshot;

/// Commands flowing from the WebSocket handlers into the hub task.
#[derive(Debug)]
pub enum HubCommand {
    /// Request to enter a room; the peer must not be in one already.
    Join {
        peer_id: PeerId,
        room: String,
        display_name: Option<String>,
    },

    /// Explicit leave; the connection stays open.
    Leave { peer_id: PeerId },

    /// Opaque payload for one other member of the sender's room.
    Relay {
        from: PeerId,
        to: PeerId,
        payload: serde_json::Value,
    },

    Rename { peer_id: PeerId, name: String },

    ToggleLock { peer_id: PeerId },

    Chat { peer_id: PeerId, text: String },

    /// The WebSocket closed. Sole cancellation signal for a peer.
    Disconnect { peer_id: PeerId },

    /// Close every room and stop the hub.
    Shutdown { done: oneshot::Sender<()> },
}
