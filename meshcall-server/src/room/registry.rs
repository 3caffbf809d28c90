use crate::error::{JoinRejection, RegistryError};
use crate::room::{Member, Room};
use clap::ValueEnum;
use meshcall_core::{MemberInfo, PeerId};
use std::collections::HashMap;
use tracing::info;

pub const DEFAULT_ROOM_CAPACITY: usize = 5;

/// What happens to a room when its host leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HostDeparture {
    /// The earliest-joined remaining member becomes host.
    #[default]
    ElectSuccessor,
    /// The room is deleted and the remaining members are told it closed.
    CloseRoom,
}

#[derive(Debug, Clone)]
pub struct RoomPolicy {
    pub capacity: usize,
    pub host_departure: HostDeparture,
}

impl Default for RoomPolicy {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ROOM_CAPACITY,
            host_departure: HostDeparture::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JoinAccepted {
    pub room: String,
    pub member: Member,
    /// Members present before the join, in join order.
    pub others: Vec<MemberInfo>,
    pub locked: bool,
    pub host_id: PeerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureOutcome {
    /// A non-host left; nothing else changed.
    Stayed,
    HostChanged(PeerId),
    /// Host left under [`HostDeparture::CloseRoom`]; the room no longer exists.
    RoomClosed,
    /// The last member left; the room no longer exists.
    RoomDeleted,
}

#[derive(Debug, Clone)]
pub struct Departure {
    pub member: Member,
    /// Peers still in the room, or evicted by a closure, in join order.
    pub remaining: Vec<PeerId>,
    pub outcome: DepartureOutcome,
}

/// Sole owner of every [`Room`]. Lives inside the hub task, so all access is
/// serialized and needs no locking.
pub struct Registry {
    rooms: HashMap<String, Room>,
    policy: RoomPolicy,
}

impl Registry {
    pub fn new(policy: RoomPolicy) -> Self {
        Self {
            rooms: HashMap::new(),
            policy,
        }
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lock is checked before capacity: a locked room refuses even when it
    /// has free seats.
    pub fn join(
        &mut self,
        room_name: &str,
        peer_id: PeerId,
        display_name: Option<String>,
    ) -> Result<JoinAccepted, JoinRejection> {
        let existing = self.rooms.get(room_name).map(Room::len).unwrap_or(0);

        if let Some(room) = self.rooms.get(room_name) {
            if room.is_locked() {
                return Err(JoinRejection::Locked(room_name.to_owned()));
            }
        }
        if existing >= self.policy.capacity {
            return Err(JoinRejection::Full(room_name.to_owned()));
        }

        let display_name = display_name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Participant {}", existing + 1));

        let member = Member {
            id: peer_id,
            display_name,
        };

        if let Some(room) = self.rooms.get_mut(room_name) {
            let others = room.members().iter().map(Member::info).collect();
            room.push(member.clone());
            return Ok(JoinAccepted {
                room: room_name.to_owned(),
                member,
                others,
                locked: room.is_locked(),
                host_id: room.host_id().clone(),
            });
        }

        info!("Creating new room: {}", room_name);
        self.rooms.insert(
            room_name.to_owned(),
            Room::new(room_name.to_owned(), member.clone()),
        );

        Ok(JoinAccepted {
            room: room_name.to_owned(),
            host_id: member.id.clone(),
            member,
            others: Vec::new(),
            locked: false,
        })
    }

    pub fn leave(&mut self, room_name: &str, peer_id: &PeerId) -> Result<Departure, RegistryError> {
        let room = self
            .rooms
            .get_mut(room_name)
            .ok_or_else(|| RegistryError::UnknownRoom(room_name.to_owned()))?;

        let was_host = room.is_host(peer_id);
        let member = room.remove(peer_id).ok_or_else(|| RegistryError::NotAMember {
            room: room_name.to_owned(),
            peer_id: peer_id.clone(),
        })?;

        let remaining = room.member_ids();

        let outcome = if room.is_empty() {
            DepartureOutcome::RoomDeleted
        } else if !was_host {
            DepartureOutcome::Stayed
        } else {
            match self.policy.host_departure {
                HostDeparture::CloseRoom => DepartureOutcome::RoomClosed,
                HostDeparture::ElectSuccessor => match room.elect_host() {
                    Some(successor) => {
                        info!("Room '{}' has a new host: {}", room_name, successor);
                        DepartureOutcome::HostChanged(successor)
                    }
                    None => DepartureOutcome::RoomDeleted,
                },
            }
        };

        if matches!(
            outcome,
            DepartureOutcome::RoomDeleted | DepartureOutcome::RoomClosed
        ) {
            self.rooms.remove(room_name);
            info!("Room '{}' removed ({:?})", room_name, outcome);
        }

        Ok(Departure {
            member,
            remaining,
            outcome,
        })
    }

    /// Returns the new lock state. Only the host may toggle.
    pub fn toggle_lock(&mut self, room_name: &str, peer_id: &PeerId) -> Result<bool, RegistryError> {
        let room = self
            .rooms
            .get_mut(room_name)
            .ok_or_else(|| RegistryError::UnknownRoom(room_name.to_owned()))?;

        if !room.is_host(peer_id) {
            return Err(RegistryError::NotHost {
                room: room_name.to_owned(),
                peer_id: peer_id.clone(),
            });
        }

        Ok(room.toggle_lock())
    }

    /// Returns the stored (trimmed) name.
    pub fn rename(
        &mut self,
        room_name: &str,
        peer_id: &PeerId,
        new_name: &str,
    ) -> Result<String, RegistryError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let room = self
            .rooms
            .get_mut(room_name)
            .ok_or_else(|| RegistryError::UnknownRoom(room_name.to_owned()))?;

        if !room.rename(peer_id, new_name.to_owned()) {
            return Err(RegistryError::NotAMember {
                room: room_name.to_owned(),
                peer_id: peer_id.clone(),
            });
        }

        Ok(new_name.to_owned())
    }

    /// Removes and returns every room. Used at shutdown.
    pub fn drain(&mut self) -> Vec<Room> {
        self.rooms.drain().map(|(_, room)| room).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RoomPolicy::default())
    }
}
