use crate::error::{JoinRejection, RegistryError};
use crate::hub::HubCommand;
use crate::room::{DepartureOutcome, Registry, Room};
use crate::signaling::SignalingOutput;
use meshcall_core::{PeerId, ServerMessage};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub const HOST_LEFT_REASON: &str = "host left the room";
pub const SHUTDOWN_REASON: &str = "server shutting down";

/// Single task that owns the registry and routes every room-scoped event.
///
/// Commands are handled one at a time to completion, so no handler ever sees
/// a half-updated membership, and messages between any two peers leave in
/// the order they arrived.
pub struct Hub {
    registry: Registry,
    peer_rooms: HashMap<PeerId, String>,
    command_rx: mpsc::Receiver<HubCommand>,
    signaling: Arc<dyn SignalingOutput>,
}

impl Hub {
    pub fn new(
        registry: Registry,
        command_rx: mpsc::Receiver<HubCommand>,
        signaling: Arc<dyn SignalingOutput>,
    ) -> Self {
        Self {
            registry,
            peer_rooms: HashMap::new(),
            command_rx,
            signaling,
        }
    }

    /// Runs until `Shutdown` arrives or every command sender is dropped.
    /// Both paths close all rooms first.
    pub async fn run(mut self) {
        info!("Signaling hub started");

        while let Some(cmd) = self.command_rx.recv().await {
            if let HubCommand::Shutdown { done } = cmd {
                info!("Shutdown requested");
                self.teardown().await;
                let _ = done.send(());
                return;
            }
            self.handle_command(cmd).await;
        }

        info!("Command channel closed. Tearing down rooms.");
        self.teardown().await;
    }

    pub async fn handle_command(&mut self, cmd: HubCommand) {
        match cmd {
            HubCommand::Join {
                peer_id,
                room,
                display_name,
            } => self.handle_join(peer_id, room, display_name).await,

            HubCommand::Leave { peer_id } => {
                info!("Peer {} leaves its room", peer_id);
                self.handle_departure(&peer_id).await;
            }

            HubCommand::Disconnect { peer_id } => {
                debug!("Peer {} disconnected", peer_id);
                self.handle_departure(&peer_id).await;
            }

            HubCommand::Relay { from, to, payload } => self.handle_relay(from, to, payload).await,

            HubCommand::Rename { peer_id, name } => self.handle_rename(peer_id, name).await,

            HubCommand::ToggleLock { peer_id } => self.handle_toggle_lock(peer_id).await,

            HubCommand::Chat { peer_id, text } => self.handle_chat(peer_id, text).await,

            HubCommand::Shutdown { done } => {
                self.teardown().await;
                let _ = done.send(());
            }
        }
    }

    fn room_of(&self, peer_id: &PeerId) -> Option<&Room> {
        let name = self.peer_rooms.get(peer_id)?;
        self.registry.room(name)
    }

    async fn handle_join(&mut self, peer_id: PeerId, room: String, display_name: Option<String>) {
        if room.trim().is_empty() {
            warn!("Dropping join with an empty room name from {}", peer_id);
            return;
        }
        if let Some(current) = self.peer_rooms.get(&peer_id) {
            warn!(
                "Dropping join to '{}' from {}: already in room '{}'",
                room, peer_id, current
            );
            return;
        }

        let accepted = match self.registry.join(&room, peer_id.clone(), display_name) {
            Ok(accepted) => accepted,
            Err(rejection) => {
                info!("Join of {} rejected: {}", peer_id, rejection);
                let msg = match rejection {
                    JoinRejection::Locked(room) => ServerMessage::RejectedLocked { room },
                    JoinRejection::Full(room) => ServerMessage::RejectedFull { room },
                };
                self.signaling.send(&peer_id, msg).await;
                return;
            }
        };

        info!(
            "Peer {} joined room '{}' as '{}' ({} already present)",
            peer_id,
            accepted.room,
            accepted.member.display_name,
            accepted.others.len()
        );
        self.peer_rooms.insert(peer_id.clone(), accepted.room.clone());

        let existing: Vec<PeerId> = accepted.others.iter().map(|m| m.id.clone()).collect();
        let announcement = ServerMessage::PeerJoined(accepted.member.info());

        self.signaling
            .send(
                &peer_id,
                ServerMessage::Joined {
                    room: accepted.room,
                    assigned_name: accepted.member.display_name,
                    members: accepted.others,
                    locked: accepted.locked,
                    host_id: accepted.host_id,
                },
            )
            .await;
        self.signaling.broadcast(&existing, announcement).await;
    }

    async fn handle_departure(&mut self, peer_id: &PeerId) {
        let Some(room) = self.peer_rooms.remove(peer_id) else {
            debug!("Peer {} was not in a room", peer_id);
            return;
        };

        let departure = match self.registry.leave(&room, peer_id) {
            Ok(departure) => departure,
            Err(e) => {
                warn!("Inconsistent departure of {}: {}", peer_id, e);
                return;
            }
        };

        self.signaling
            .broadcast(
                &departure.remaining,
                ServerMessage::PeerLeft {
                    id: peer_id.clone(),
                },
            )
            .await;

        match departure.outcome {
            DepartureOutcome::Stayed | DepartureOutcome::RoomDeleted => {}
            DepartureOutcome::HostChanged(host_id) => {
                self.signaling
                    .broadcast(&departure.remaining, ServerMessage::HostChanged { host_id })
                    .await;
            }
            DepartureOutcome::RoomClosed => {
                info!("Host of '{}' left; closing the room", room);
                for member in &departure.remaining {
                    self.peer_rooms.remove(member);
                }
                self.signaling
                    .broadcast(
                        &departure.remaining,
                        ServerMessage::RoomClosed {
                            reason: HOST_LEFT_REASON.to_owned(),
                        },
                    )
                    .await;
            }
        }
    }

    async fn handle_relay(&mut self, from: PeerId, to: PeerId, payload: serde_json::Value) {
        let Some(room) = self.room_of(&from) else {
            warn!("Dropping relay from {}: sender is not in a room", from);
            return;
        };
        if from == to || !room.contains(&to) {
            warn!(
                "Dropping relay from {} to {}: recipient is not in room '{}'",
                from,
                to,
                room.name()
            );
            return;
        }

        self.signaling
            .send(&to, ServerMessage::Relay { from, payload })
            .await;
    }

    async fn handle_rename(&mut self, peer_id: PeerId, name: String) {
        let Some(room) = self.peer_rooms.get(&peer_id).cloned() else {
            warn!("Dropping rename from {}: not in a room", peer_id);
            return;
        };

        match self.registry.rename(&room, &peer_id, &name) {
            Ok(new_name) => {
                info!("Peer {} is now '{}'", peer_id, new_name);
                let others = self
                    .registry
                    .room(&room)
                    .map(|r| r.member_ids_except(&peer_id))
                    .unwrap_or_default();
                self.signaling
                    .broadcast(&others, ServerMessage::Renamed { peer_id, new_name })
                    .await;
            }
            Err(e) => warn!("Dropping rename from {}: {}", peer_id, e),
        }
    }

    async fn handle_toggle_lock(&mut self, peer_id: PeerId) {
        let Some(room) = self.peer_rooms.get(&peer_id).cloned() else {
            warn!("Dropping lock toggle from {}: not in a room", peer_id);
            return;
        };

        match self.registry.toggle_lock(&room, &peer_id) {
            Ok(locked) => {
                info!("Room '{}' locked: {}", room, locked);
                let members = self
                    .registry
                    .room(&room)
                    .map(Room::member_ids)
                    .unwrap_or_default();
                self.signaling
                    .broadcast(&members, ServerMessage::LockChanged { locked })
                    .await;
            }
            Err(RegistryError::NotHost { .. }) => {
                debug!("Ignoring lock toggle from non-host {}", peer_id);
            }
            Err(e) => warn!("Dropping lock toggle from {}: {}", peer_id, e),
        }
    }

    async fn handle_chat(&mut self, peer_id: PeerId, text: String) {
        if text.trim().is_empty() {
            debug!("Dropping empty chat message from {}", peer_id);
            return;
        }
        let Some(room) = self.room_of(&peer_id) else {
            warn!("Dropping chat from {}: not in a room", peer_id);
            return;
        };
        let Some(sender) = room.member(&peer_id) else {
            return;
        };

        let msg = ServerMessage::Chat {
            sender_id: peer_id.clone(),
            sender_name: sender.display_name.clone(),
            text,
        };
        let members = room.member_ids();
        self.signaling.broadcast(&members, msg).await;
    }

    async fn teardown(&mut self) {
        for room in self.registry.drain() {
            info!("Closing room '{}' ({} members)", room.name(), room.len());
            self.signaling
                .broadcast(
                    &room.member_ids(),
                    ServerMessage::RoomClosed {
                        reason: SHUTDOWN_REASON.to_owned(),
                    },
                )
                .await;
        }
        self.peer_rooms.clear();
    }
}
