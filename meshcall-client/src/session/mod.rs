mod peer_session;
mod session_store;

pub use peer_session::*;
pub use session_store::*;
