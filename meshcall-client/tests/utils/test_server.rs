use crate::utils::ScriptedTransportFactory;
use meshcall_client::{
    ClientConfig, ClientEvent, ClientHandle, MediaPolicy, NoCapture, start_client,
};
use meshcall_core::{PeerId, ServerMessage};
use meshcall_server::ServerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// A real signaling server on an ephemeral port.
pub struct TestServer {
    pub url: String,
}

impl TestServer {
    pub async fn start() -> Self {
        let config = ServerConfig {
            ice_servers: vec![],
            ..Default::default()
        };
        let (service, _hub) = meshcall_server::start(&config);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = meshcall_server::router(service);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            url: format!("ws://{addr}/ws"),
        }
    }

    pub async fn client(&self) -> TestClient {
        let config = ClientConfig {
            media_policy: MediaPolicy::MediaLess,
            ice_servers: vec![],
            ..Default::default()
        };
        let (handle, events, _task) = start_client(
            &self.url,
            config,
            Arc::new(ScriptedTransportFactory),
            Arc::new(NoCapture),
        )
        .await
        .unwrap();

        let mut client = TestClient {
            handle,
            events,
            peer_id: PeerId::new(),
        };
        let welcome = client
            .wait_for(|e| matches!(e, ClientEvent::Server(ServerMessage::Welcome { .. })))
            .await;
        if let ClientEvent::Server(ServerMessage::Welcome { peer_id }) = welcome {
            client.peer_id = peer_id;
        }
        client
    }
}

pub struct TestClient {
    pub handle: ClientHandle,
    pub events: mpsc::UnboundedReceiver<ClientEvent>,
    pub peer_id: PeerId,
}

impl TestClient {
    /// Skips events until one matches, failing the test after a timeout.
    pub async fn wait_for<F>(&mut self, mut pred: F) -> ClientEvent
    where
        F: FnMut(&ClientEvent) -> bool,
    {
        let deadline = tokio::time::Instant::now() + EVENT_TIMEOUT;
        loop {
            let event = tokio::time::timeout_at(deadline, self.events.recv())
                .await
                .expect("timed out waiting for client event")
                .expect("client engine stopped");
            if pred(&event) {
                return event;
            }
        }
    }

    pub async fn join(&mut self, room: &str) -> ServerMessage {
        self.handle.join(room, None).unwrap();
        let event = self
            .wait_for(|e| {
                matches!(
                    e,
                    ClientEvent::Server(
                        ServerMessage::Joined { .. }
                            | ServerMessage::RejectedFull { .. }
                            | ServerMessage::RejectedLocked { .. }
                    )
                )
            })
            .await;
        match event {
            ClientEvent::Server(msg) => msg,
            other => panic!("unexpected event {other:?}"),
        }
    }

    /// Waits until every listed pair has negotiated, in any order.
    pub async fn wait_negotiated(&mut self, peers: &[&PeerId]) {
        let mut pending: Vec<PeerId> = peers.iter().map(|p| (*p).clone()).collect();
        while !pending.is_empty() {
            let event = self
                .wait_for(|e| matches!(e, ClientEvent::PairNegotiated { .. }))
                .await;
            if let ClientEvent::PairNegotiated { peer_id } = event {
                pending.retain(|p| p != &peer_id);
            }
        }
    }
}
