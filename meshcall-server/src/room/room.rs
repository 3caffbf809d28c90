use meshcall_core::{MemberInfo, PeerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: PeerId,
    pub display_name: String,
}

impl Member {
    pub fn info(&self) -> MemberInfo {
        MemberInfo {
            id: self.id.clone(),
            username: self.display_name.clone(),
        }
    }
}

/// A named call session.
///
/// Members are kept in join order: the first entry is always the
/// earliest-joined survivor, which is who inherits the host role.
#[derive(Debug)]
pub struct Room {
    name: String,
    members: Vec<Member>,
    locked: bool,
    host_id: PeerId,
}

impl Room {
    pub(crate) fn new(name: String, founder: Member) -> Self {
        Self {
            name,
            host_id: founder.id.clone(),
            members: vec![founder],
            locked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, peer_id: &PeerId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == peer_id)
    }

    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.member(peer_id).is_some()
    }

    pub fn member_ids(&self) -> Vec<PeerId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    pub fn member_ids_except(&self, peer_id: &PeerId) -> Vec<PeerId> {
        self.members
            .iter()
            .filter(|m| &m.id != peer_id)
            .map(|m| m.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn host_id(&self) -> &PeerId {
        &self.host_id
    }

    pub fn is_host(&self, peer_id: &PeerId) -> bool {
        &self.host_id == peer_id
    }

    pub(crate) fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Removes a member without touching the host. Callers re-elect.
    pub(crate) fn remove(&mut self, peer_id: &PeerId) -> Option<Member> {
        let index = self.members.iter().position(|m| &m.id == peer_id)?;
        Some(self.members.remove(index))
    }

    pub(crate) fn elect_host(&mut self) -> Option<PeerId> {
        let successor = self.members.first()?.id.clone();
        self.host_id = successor.clone();
        Some(successor)
    }

    pub(crate) fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    pub(crate) fn rename(&mut self, peer_id: &PeerId, name: String) -> bool {
        match self.members.iter_mut().find(|m| &m.id == peer_id) {
            Some(member) => {
                member.display_name = name;
                true
            }
            None => false,
        }
    }
}
