use meshcall_core::PeerId;
use thiserror::Error;

/// Policy refusal of a join attempt. Reported to the joiner only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRejection {
    #[error("room '{0}' is locked")]
    Locked(String),
    #[error("room '{0}' is full")]
    Full(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("room '{0}' does not exist")]
    UnknownRoom(String),
    #[error("peer {peer_id} is not a member of room '{room}'")]
    NotAMember { room: String, peer_id: PeerId },
    #[error("peer {peer_id} is not the host of room '{room}'")]
    NotHost { room: String, peer_id: PeerId },
    #[error("display name must not be empty")]
    EmptyName,
}
