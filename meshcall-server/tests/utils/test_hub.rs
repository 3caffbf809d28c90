use meshcall_core::{PeerId, ServerMessage};
use meshcall_server::{Hub, HubCommand, Registry, RoomPolicy};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::mock_signaling::MockSignalingOutput;

/// Drives a [`Hub`] one command at a time, without spawning it.
pub struct TestHub {
    hub: Hub,
    pub signaling: MockSignalingOutput,
    _cmd_tx: mpsc::Sender<HubCommand>,
}

impl TestHub {
    pub fn new(policy: RoomPolicy) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (signaling, _deliveries) = MockSignalingOutput::new();
        let hub = Hub::new(
            Registry::new(policy),
            cmd_rx,
            Arc::new(signaling.clone()),
        );

        Self {
            hub,
            signaling,
            _cmd_tx: cmd_tx,
        }
    }

    pub async fn apply(&mut self, cmd: HubCommand) {
        self.hub.handle_command(cmd).await;
    }

    pub async fn join(&mut self, peer_id: &PeerId, room: &str) {
        self.apply(HubCommand::Join {
            peer_id: peer_id.clone(),
            room: room.to_owned(),
            display_name: None,
        })
        .await;
    }

    pub async fn disconnect(&mut self, peer_id: &PeerId) {
        self.apply(HubCommand::Disconnect {
            peer_id: peer_id.clone(),
        })
        .await;
    }

    pub async fn take(&self, peer_id: &PeerId) -> Vec<ServerMessage> {
        self.signaling.take_for(peer_id).await
    }

    /// Joins every peer in order and forgets the resulting traffic.
    pub async fn populate(&mut self, room: &str, peers: &[&PeerId]) {
        for peer_id in peers {
            self.join(peer_id, room).await;
        }
        self.signaling.clear().await;
    }
}
