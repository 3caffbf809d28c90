use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::media::MediaCapture;
use crate::session::SessionStore;
use crate::transport::{TransportEvent, TransportFactory};
use meshcall_core::{ClientMessage, IceServerConfig, MemberInfo, PeerId, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

mod commands_impl;
mod handle_relay_impl;
mod handle_server_impl;


/// Local copy of the room the client currently sits in.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomView {
    pub name: String,
    /// Other members only; the local peer is not listed.
    pub members: Vec<MemberInfo>,
    pub locked: bool,
    pub host_id: PeerId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender_id: PeerId,
    pub sender_name: String,
    pub text: String,
}

/// What the engine reports to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Every server event is passed through unchanged.
    Server(ServerMessage),
    /// Both descriptions are in place for this pair.
    PairNegotiated { peer_id: PeerId },
    RemoteTrack { peer_id: PeerId, kind: String },
    MediaLinkLost { peer_id: PeerId },
    JoinFailed { reason: String },
}

#[derive(Debug)]
pub enum ClientCommand {
    Join {
        room: String,
        display_name: Option<String>,
    },
    Leave,
    Rename {
        name: String,
    },
    ToggleLock,
    Chat {
        text: String,
    },
}

/// Cloneable front door to a running engine.
#[derive(Clone)]
pub struct ClientHandle {
    tx: mpsc::UnboundedSender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(tx: mpsc::UnboundedSender<ClientCommand>) -> Self {
        Self { tx }
    }

    fn submit(&self, cmd: ClientCommand) -> Result<(), ClientError> {
        self.tx.send(cmd).map_err(|_| ClientError::Disconnected)
    }

    pub fn join(&self, room: &str, display_name: Option<String>) -> Result<(), ClientError> {
        self.submit(ClientCommand::Join {
            room: room.to_owned(),
            display_name,
        })
    }

    pub fn leave(&self) -> Result<(), ClientError> {
        self.submit(ClientCommand::Leave)
    }

    pub fn rename(&self, name: &str) -> Result<(), ClientError> {
        self.submit(ClientCommand::Rename {
            name: name.to_owned(),
        })
    }

    pub fn toggle_lock(&self) -> Result<(), ClientError> {
        self.submit(ClientCommand::ToggleLock)
    }

    pub fn chat(&self, text: &str) -> Result<(), ClientError> {
        self.submit(ClientCommand::Chat {
            text: text.to_owned(),
        })
    }
}

/// Client-side actor. Owns the peer sessions and processes server events,
/// local commands and transport callbacks one at a time.
pub struct ClientEngine {
    config: ClientConfig,
    local_id: Option<PeerId>,
    local_name: Option<String>,
    pending_room: Option<String>,
    room: Option<RoomView>,
    ice_servers: Vec<IceServerConfig>,
    sessions: SessionStore,
    transcript: Vec<ChatEntry>,
    media_less: bool,
    factory: Arc<dyn TransportFactory>,
    media: Arc<dyn MediaCapture>,
    outbound: mpsc::UnboundedSender<ClientMessage>,
    events: mpsc::UnboundedSender<ClientEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    transport_rx: mpsc::Receiver<TransportEvent>,
}

impl ClientEngine {
    pub fn new(
        config: ClientConfig,
        factory: Arc<dyn TransportFactory>,
        media: Arc<dyn MediaCapture>,
        outbound: mpsc::UnboundedSender<ClientMessage>,
    ) -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (transport_tx, transport_rx) = mpsc::channel(config.transport_queue.max(1));
        let engine = Self {
            ice_servers: config.ice_servers.clone(),
            config,
            local_id: None,
            local_name: None,
            pending_room: None,
            room: None,
            sessions: SessionStore::new(),
            transcript: Vec::new(),
            media_less: false,
            factory,
            media,
            outbound,
            events,
            transport_tx,
            transport_rx,
        };
        (engine, events_rx)
    }

    pub fn local_id(&self) -> Option<&PeerId> {
        self.local_id.as_ref()
    }

    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    pub fn room(&self) -> Option<&RoomView> {
        self.room.as_ref()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn is_media_less(&self) -> bool {
        self.media_less
    }

    pub fn is_host(&self) -> bool {
        match (&self.room, &self.local_id) {
            (Some(room), Some(id)) => &room.host_id == id,
            _ => false,
        }
    }

    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ClientCommand>,
        mut inbound: mpsc::UnboundedReceiver<ServerMessage>,
    ) {
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(c) => self.handle_command(c).await,
                    None => {
                        info!("Client handle dropped, stopping engine");
                        break;
                    }
                },
                msg = inbound.recv() => match msg {
                    Some(m) => self.handle_server_message(m).await,
                    None => {
                        warn!("Signaling connection closed");
                        break;
                    }
                },
                evt = self.transport_rx.recv() => {
                    if let Some(e) = evt {
                        self.handle_transport_event(e).await;
                    }
                }
            }
        }

        self.close_all_sessions().await;
    }

    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(event);
    }

    fn send(&self, msg: ClientMessage) -> Result<(), ClientError> {
        self.outbound.send(msg).map_err(|_| ClientError::Disconnected)
    }

    fn current_room(&self) -> Result<String, ClientError> {
        self.room
            .as_ref()
            .map(|r| r.name.clone())
            .ok_or(ClientError::NotInRoom)
    }
}
