use async_trait::async_trait;
use meshcall_core::{PeerId, ServerMessage};

/// Outbound side of the relay: whatever owns the client connections
/// implements this so the hub can reach peers.
///
/// Delivery is fire-and-forget. Messages to one peer must stay in order.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn send(&self, peer_id: &PeerId, msg: ServerMessage);

    async fn broadcast(&self, peers: &[PeerId], msg: ServerMessage) {
        for peer_id in peers {
            self.send(peer_id, msg.clone()).await;
        }
    }
}
