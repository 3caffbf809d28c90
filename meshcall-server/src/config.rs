use crate::room::{DEFAULT_ROOM_CAPACITY, HostDeparture, RoomPolicy};
use clap::Parser;
use meshcall_core::IceServerConfig;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_STUN_SERVER: &str = "stun:stun.l.google.com:19302";

#[derive(Parser, Debug, Clone)]
#[command(name = "meshcall-server")]
#[command(about = "Signaling server for full-mesh WebRTC calls")]
pub struct ServerConfig {
    /// Address the WebSocket endpoint listens on
    #[arg(long, env = "MESHCALL_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Maximum number of members per room
    #[arg(long, env = "MESHCALL_ROOM_CAPACITY", default_value_t = DEFAULT_ROOM_CAPACITY)]
    pub room_capacity: usize,

    /// What happens to a room when its host leaves
    #[arg(
        long,
        env = "MESHCALL_HOST_DEPARTURE",
        value_enum,
        default_value_t = HostDeparture::ElectSuccessor
    )]
    pub host_departure: HostDeparture,

    /// STUN/TURN URLs announced to clients
    #[arg(
        long = "ice-server",
        env = "MESHCALL_ICE_SERVERS",
        value_delimiter = ',',
        default_value = DEFAULT_STUN_SERVER
    )]
    pub ice_servers: Vec<String>,

    /// Username attached to `turn:`/`turns:` URLs
    #[arg(long, env = "MESHCALL_TURN_USERNAME")]
    pub turn_username: Option<String>,

    /// Credential attached to `turn:`/`turns:` URLs
    #[arg(long, env = "MESHCALL_TURN_CREDENTIAL")]
    pub turn_credential: Option<String>,
}

impl ServerConfig {
    pub fn room_policy(&self) -> RoomPolicy {
        RoomPolicy {
            capacity: self.room_capacity,
            host_departure: self.host_departure,
        }
    }

    pub fn ice_server_configs(&self) -> Vec<IceServerConfig> {
        self.ice_servers
            .iter()
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                let url = url.trim().to_owned();
                if url.starts_with("turn:") || url.starts_with("turns:") {
                    IceServerConfig {
                        urls: vec![url],
                        username: self.turn_username.clone(),
                        credential: self.turn_credential.clone(),
                    }
                } else {
                    IceServerConfig::stun(url)
                }
            })
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            room_capacity: DEFAULT_ROOM_CAPACITY,
            host_departure: HostDeparture::ElectSuccessor,
            ice_servers: vec![DEFAULT_STUN_SERVER.to_owned()],
            turn_username: None,
            turn_credential: None,
        }
    }
}
