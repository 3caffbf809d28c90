use crate::engine::{ChatEntry, ClientEngine, ClientEvent, RoomView};
use meshcall_core::ServerMessage;
use tracing::{debug, info, warn};

/// Which end of a pair sends the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Role {
    Initiator,
    Responder,
}

impl ClientEngine {
    pub(super) async fn handle_server_message(&mut self, msg: ServerMessage) {
        self.emit(ClientEvent::Server(msg.clone()));

        match msg {
            ServerMessage::Welcome { peer_id } => {
                info!("Connected as {}", peer_id);
                self.local_id = Some(peer_id);
            }

            ServerMessage::IceConfig { ice_servers } => {
                info!("Received ICE config: {} servers", ice_servers.len());
                if !ice_servers.is_empty() {
                    self.ice_servers = ice_servers;
                }
            }

            ServerMessage::Joined {
                room,
                assigned_name,
                members,
                locked,
                host_id,
            } => {
                if self.pending_room.as_deref() != Some(room.as_str()) {
                    // Late answer to an abandoned join.
                    debug!("Ignoring joined for '{}' without a pending join", room);
                    return;
                }
                info!(
                    "Joined '{}' as '{}' with {} other members",
                    room,
                    assigned_name,
                    members.len()
                );
                self.pending_room = None;
                self.local_name = Some(assigned_name);
                self.room = Some(RoomView {
                    name: room.clone(),
                    members: members.clone(),
                    locked,
                    host_id,
                });
                // The newcomer offers to everyone already present.
                for member in members {
                    self.open_session(&room, member.id, Role::Initiator).await;
                }
            }

            ServerMessage::PeerJoined(member) => {
                let Some(view) = self.room.as_mut() else {
                    warn!("peer-joined for {} outside a room", member.id);
                    return;
                };
                let room = view.name.clone();
                let peer_id = member.id.clone();
                view.members.push(member);
                self.open_session(&room, peer_id, Role::Responder).await;
            }

            ServerMessage::PeerLeft { id } => {
                let Some(view) = self.room.as_mut() else {
                    return;
                };
                view.members.retain(|m| m.id != id);
                let room = view.name.clone();
                self.close_session(&room, &id).await;
            }

            ServerMessage::RejectedFull { room } => {
                info!("Room '{}' is full", room);
                self.pending_room = None;
            }

            ServerMessage::RejectedLocked { room } => {
                info!("Room '{}' is locked", room);
                self.pending_room = None;
            }

            ServerMessage::RoomClosed { reason } => {
                info!("Room closed: {}", reason);
                self.room = None;
                self.pending_room = None;
                self.close_all_sessions().await;
            }

            ServerMessage::LockChanged { locked } => {
                if let Some(view) = self.room.as_mut() {
                    view.locked = locked;
                }
            }

            ServerMessage::Renamed { peer_id, new_name } => {
                if self.local_id.as_ref() == Some(&peer_id) {
                    self.local_name = Some(new_name);
                } else if let Some(member) = self
                    .room
                    .as_mut()
                    .and_then(|view| view.members.iter_mut().find(|m| m.id == peer_id))
                {
                    member.username = new_name;
                }
            }

            ServerMessage::HostChanged { host_id } => {
                if let Some(view) = self.room.as_mut() {
                    debug!("Host is now {}", host_id);
                    view.host_id = host_id;
                }
            }

            ServerMessage::Relay { from, payload } => {
                self.handle_relay(from, payload).await;
            }

            ServerMessage::Chat {
                sender_id,
                sender_name,
                text,
            } => {
                self.transcript.push(ChatEntry {
                    sender_id,
                    sender_name,
                    text,
                });
            }
        }
    }
}
