use crate::negotiation::NegotiationState;
use crate::transport::PeerTransport;
use meshcall_core::{IceCandidate, PeerId};
use std::collections::VecDeque;

/// Everything the local client knows about one remote peer in one room.
///
/// Created when the pair is discovered and dropped when either side leaves.
/// The negotiation transitions live in `crate::negotiation`.
pub struct PeerSession {
    pub(crate) room: String,
    pub(crate) peer_id: PeerId,
    pub(crate) state: NegotiationState,
    pub(crate) remote_description_set: bool,
    pub(crate) candidate_queue: VecDeque<IceCandidate>,
    pub(crate) transport: Box<dyn PeerTransport>,
}

impl PeerSession {
    pub fn new(room: impl Into<String>, peer_id: PeerId, transport: Box<dyn PeerTransport>) -> Self {
        Self {
            room: room.into(),
            peer_id,
            state: NegotiationState::Stable,
            remote_description_set: false,
            candidate_queue: VecDeque::new(),
            transport,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn peer_id(&self) -> &PeerId {
        &self.peer_id
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn has_remote_description(&self) -> bool {
        self.remote_description_set
    }

    pub fn queued_candidates(&self) -> usize {
        self.candidate_queue.len()
    }

    pub async fn close(self) -> anyhow::Result<()> {
        self.transport.close().await
    }
}
