use crate::hub::HubCommand;
use crate::signaling::SignalingOutput;
use anyhow::anyhow;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use meshcall_core::{IceServerConfig, PeerId, ServerMessage};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

/// Outbound queues of every open connection.
///
/// This is what the hub writes to. It holds no hub sender, so the hub's
/// command queue closes once the last `SignalingService` is gone.
#[derive(Clone, Default)]
pub struct PeerOutputs {
    peers: Arc<DashMap<PeerId, mpsc::UnboundedSender<Message>>>,
}

impl PeerOutputs {
    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }

    pub fn send_signal(&self, peer_id: &PeerId, msg: &ServerMessage) {
        if let Some(peer) = self.peers.get(peer_id) {
            match serde_json::to_string(msg) {
                Ok(json) => {
                    if let Err(e) = peer.send(Message::Text(json.into())) {
                        error!("Failed to send WS message to {}: {:?}", peer_id, e);
                    }
                }
                Err(e) => error!("Failed to serialize signal message: {}", e),
            }
        } else {
            warn!("Attempted to send signal to disconnected peer {}", peer_id);
        }
    }
}

#[async_trait]
impl SignalingOutput for PeerOutputs {
    async fn send(&self, peer_id: &PeerId, msg: ServerMessage) {
        self.send_signal(peer_id, &msg);
    }
}

/// Connection table plus the sending half of the hub queue.
#[derive(Clone)]
pub struct SignalingService {
    outputs: PeerOutputs,
    ice_servers: Arc<Vec<IceServerConfig>>,
    pub(crate) hub_tx: mpsc::Sender<HubCommand>,
}

impl SignalingService {
    pub fn new(
        outputs: PeerOutputs,
        hub_tx: mpsc::Sender<HubCommand>,
        ice_servers: Vec<IceServerConfig>,
    ) -> Self {
        Self {
            outputs,
            ice_servers: Arc::new(ice_servers),
            hub_tx,
        }
    }

    pub fn outputs(&self) -> &PeerOutputs {
        &self.outputs
    }

    pub fn ice_servers(&self) -> Vec<IceServerConfig> {
        self.ice_servers.as_ref().clone()
    }

    pub(crate) async fn submit(&self, cmd: HubCommand) -> bool {
        if let Err(e) = self.hub_tx.send(cmd).await {
            error!("Hub is gone, dropping {:?}", e.0);
            return false;
        }
        true
    }

    /// Closes every room (members get `room-closed`) and stops the hub.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        let (done, finished) = oneshot::channel();
        self.hub_tx
            .send(HubCommand::Shutdown { done })
            .await
            .map_err(|_| anyhow!("hub already stopped"))?;
        finished
            .await
            .map_err(|_| anyhow!("hub stopped before finishing shutdown"))?;
        Ok(())
    }
}
