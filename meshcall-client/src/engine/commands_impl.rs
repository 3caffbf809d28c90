use crate::engine::{ClientCommand, ClientEngine, ClientEvent};
use crate::error::ClientError;
use crate::media::MediaPolicy;
use meshcall_core::ClientMessage;
use tracing::{error, info, warn};

impl ClientEngine {
    pub(super) async fn handle_command(&mut self, cmd: ClientCommand) {
        let result = match cmd {
            ClientCommand::Join { room, display_name } => {
                let result = self.join(&room, display_name).await;
                if let Err(e) = &result {
                    self.emit(ClientEvent::JoinFailed {
                        reason: e.to_string(),
                    });
                }
                result
            }
            ClientCommand::Leave => self.leave().await,
            ClientCommand::Rename { name } => self.rename(&name),
            ClientCommand::ToggleLock => self.toggle_lock(),
            ClientCommand::Chat { text } => self.chat(&text),
        };
        if let Err(e) = result {
            warn!("Command failed: {}", e);
        }
    }

    /// Acquires local media according to the configured policy, then asks
    /// the server for a seat. Sessions are opened once `joined` arrives.
    pub async fn join(
        &mut self,
        room: &str,
        display_name: Option<String>,
    ) -> Result<(), ClientError> {
        let room = room.trim();
        if room.is_empty() {
            return Err(ClientError::EmptyRoomName);
        }
        if let Some(current) = self
            .room
            .as_ref()
            .map(|r| r.name.clone())
            .or_else(|| self.pending_room.clone())
        {
            return Err(ClientError::AlreadyInRoom(current));
        }

        match self.media.acquire().await {
            Ok(()) => self.media_less = false,
            Err(e) => match self.config.media_policy {
                MediaPolicy::MediaLess => {
                    warn!("Local media unavailable ({}), joining without media", e);
                    self.media_less = true;
                }
                MediaPolicy::Abort => {
                    error!("Local media unavailable ({}), not joining '{}'", e, room);
                    return Err(e.into());
                }
            },
        }

        info!("Joining room '{}'", room);
        self.send(ClientMessage::JoinRoom {
            room: room.to_owned(),
            display_name,
        })?;
        self.pending_room = Some(room.to_owned());
        Ok(())
    }

    /// Leaves the current room or abandons a join still waiting for the
    /// server. The server handles both the same way.
    pub async fn leave(&mut self) -> Result<(), ClientError> {
        let room = match self.current_room() {
            Ok(room) => room,
            Err(e) => self.pending_room.clone().ok_or(e)?,
        };
        info!("Leaving room '{}'", room);
        self.room = None;
        self.pending_room = None;
        self.close_all_sessions().await;
        self.send(ClientMessage::LeaveRoom)
    }

    /// The server does not echo renames to their author, so the local name
    /// is updated here.
    pub fn rename(&mut self, name: &str) -> Result<(), ClientError> {
        self.current_room()?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        self.local_name = Some(name.to_owned());
        self.send(ClientMessage::Rename {
            name: name.to_owned(),
        })
    }

    pub fn toggle_lock(&mut self) -> Result<(), ClientError> {
        self.current_room()?;
        self.send(ClientMessage::ToggleLock)
    }

    pub fn chat(&mut self, text: &str) -> Result<(), ClientError> {
        self.current_room()?;
        if text.trim().is_empty() {
            return Ok(());
        }
        self.send(ClientMessage::Chat {
            text: text.to_owned(),
        })
    }
}
