use crate::session::PeerSession;
use meshcall_core::PeerId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub room: String,
    pub peer_id: PeerId,
}

impl SessionKey {
    pub fn new(room: &str, peer_id: &PeerId) -> Self {
        Self {
            room: room.to_owned(),
            peer_id: peer_id.clone(),
        }
    }
}

/// Owns every live `PeerSession` of the local client, at most one per
/// (room, remote peer).
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<SessionKey, PeerSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session that was displaced, if any.
    pub fn insert(&mut self, session: PeerSession) -> Option<PeerSession> {
        let key = SessionKey::new(session.room(), session.peer_id());
        self.sessions.insert(key, session)
    }

    pub fn get(&self, room: &str, peer_id: &PeerId) -> Option<&PeerSession> {
        self.sessions.get(&SessionKey::new(room, peer_id))
    }

    pub fn get_mut(&mut self, room: &str, peer_id: &PeerId) -> Option<&mut PeerSession> {
        self.sessions.get_mut(&SessionKey::new(room, peer_id))
    }

    pub fn contains(&self, room: &str, peer_id: &PeerId) -> bool {
        self.get(room, peer_id).is_some()
    }

    pub fn remove(&mut self, room: &str, peer_id: &PeerId) -> Option<PeerSession> {
        self.sessions.remove(&SessionKey::new(room, peer_id))
    }

    pub fn peers(&self, room: &str) -> Vec<PeerId> {
        self.sessions
            .keys()
            .filter(|key| key.room == room)
            .map(|key| key.peer_id.clone())
            .collect()
    }

    pub fn drain(&mut self) -> Vec<PeerSession> {
        self.sessions.drain().map(|(_, session)| session).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
