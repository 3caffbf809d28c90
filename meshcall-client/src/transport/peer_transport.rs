use crate::transport::TransportEvent;
use async_trait::async_trait;
use meshcall_core::{IceCandidate, IceServerConfig, PeerId, SessionDescription};
use tokio::sync::mpsc;

/// One media connection to one remote peer.
///
/// Local descriptions are installed by the transport itself as part of
/// `create_offer` and `create_answer`.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn create_offer(&self) -> anyhow::Result<String>;

    async fn create_answer(&self) -> anyhow::Result<String>;

    async fn set_remote_description(&self, desc: SessionDescription) -> anyhow::Result<()>;

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> anyhow::Result<()>;

    async fn close(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TransportFactory: Send + Sync {
    async fn create(
        &self,
        peer_id: PeerId,
        ice_servers: &[IceServerConfig],
        events: mpsc::Sender<TransportEvent>,
    ) -> anyhow::Result<Box<dyn PeerTransport>>;
}
