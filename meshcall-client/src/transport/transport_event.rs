use meshcall_core::{IceCandidate, PeerId};

/// Events a transport raises from its own callbacks for the engine loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A local candidate that has to be relayed to the remote end.
    CandidateGenerated(PeerId, IceCandidate),

    /// The remote end started sending media of the given kind.
    RemoteTrack(PeerId, String),

    /// The media link failed or was closed underneath us.
    Disconnected(PeerId),
}
