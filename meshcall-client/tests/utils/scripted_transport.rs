use async_trait::async_trait;
use meshcall_client::{PeerTransport, TransportEvent, TransportFactory};
use meshcall_core::{IceCandidate, IceServerConfig, PeerId, SessionDescription};
use tokio::sync::mpsc;

/// Transport that accepts everything and answers with fixed SDP, so the
/// signaling path can be exercised without a media stack.
pub struct ScriptedTransport {
    peer_id: PeerId,
}

#[async_trait]
impl PeerTransport for ScriptedTransport {
    async fn create_offer(&self) -> anyhow::Result<String> {
        Ok(format!("v=0\r\no=- offer-for-{}\r\n", self.peer_id))
    }

    async fn create_answer(&self) -> anyhow::Result<String> {
        Ok(format!("v=0\r\no=- answer-for-{}\r\n", self.peer_id))
    }

    async fn set_remote_description(&self, _desc: SessionDescription) -> anyhow::Result<()> {
        Ok(())
    }

    async fn add_ice_candidate(&self, _candidate: IceCandidate) -> anyhow::Result<()> {
        Ok(())
    }

    async fn close(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct ScriptedTransportFactory;

#[async_trait]
impl TransportFactory for ScriptedTransportFactory {
    async fn create(
        &self,
        peer_id: PeerId,
        _ice_servers: &[IceServerConfig],
        _events: mpsc::Sender<TransportEvent>,
    ) -> anyhow::Result<Box<dyn PeerTransport>> {
        Ok(Box::new(ScriptedTransport { peer_id }))
    }
}
