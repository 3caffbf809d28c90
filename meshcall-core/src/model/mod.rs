mod member;
mod peer;
mod relay;
mod signaling;

pub use member::MemberInfo;
pub use peer::PeerId;
pub use relay::{IceCandidate, RelayPayload, SdpKind, SessionDescription};
pub use signaling::{ClientMessage, IceServerConfig, ServerMessage};
