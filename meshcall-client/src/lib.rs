pub mod config;
pub mod connection;
pub mod engine;
pub mod error;
pub mod media;
pub mod negotiation;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use connection::{SignalingConnection, connect, start_client};
pub use engine::{ChatEntry, ClientCommand, ClientEngine, ClientEvent, ClientHandle, RoomView};
pub use error::ClientError;
pub use media::{MediaCapture, MediaError, MediaPolicy, NoCapture};
pub use negotiation::{NegotiationError, NegotiationOutcome, NegotiationState};
pub use session::{PeerSession, SessionKey, SessionStore};
pub use transport::{PeerTransport, RtcTransportFactory, TransportEvent, TransportFactory};
