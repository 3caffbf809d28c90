use crate::media::MediaPolicy;
use meshcall_core::IceServerConfig;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub media_policy: MediaPolicy,
    /// Used until the server announces its own list.
    pub ice_servers: Vec<IceServerConfig>,
    /// Depth of the queue carrying transport callbacks into the engine.
    /// Values below 1 are treated as 1.
    pub transport_queue: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            media_policy: MediaPolicy::default(),
            ice_servers: vec![IceServerConfig::stun("stun:stun.l.google.com:19302")],
            transport_queue: 256,
        }
    }
}
