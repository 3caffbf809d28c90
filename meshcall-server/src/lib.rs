pub mod config;
pub mod error;
pub mod hub;
pub mod room;
pub mod signaling;

pub use config::ServerConfig;
pub use error::{JoinRejection, RegistryError};
pub use hub::{Hub, HubCommand};
pub use room::{HostDeparture, Registry, Room, RoomPolicy};
pub use signaling::{PeerOutputs, SignalingOutput, SignalingService, ws_handler};

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const HUB_QUEUE_DEPTH: usize = 1024;

/// Spawns the hub task and returns the service that feeds it.
///
/// The hub stops on [`SignalingService::shutdown`] or once every clone of
/// the service has been dropped.
pub fn start(config: &ServerConfig) -> (SignalingService, JoinHandle<()>) {
    let (hub_tx, hub_rx) = mpsc::channel(HUB_QUEUE_DEPTH);
    let outputs = PeerOutputs::default();
    let service = SignalingService::new(outputs.clone(), hub_tx, config.ice_server_configs());

    let registry = Registry::new(config.room_policy());
    let hub = Hub::new(registry, hub_rx, Arc::new(outputs));
    let handle = tokio::spawn(hub.run());

    (service, handle)
}

pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .with_state(service)
}

async fn health() -> &'static str {
    "ok"
}
