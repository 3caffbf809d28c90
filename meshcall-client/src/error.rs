use crate::media::MediaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("local media unavailable: {0}")]
    MediaUnavailable(#[from] MediaError),
    #[error("already in room '{0}'")]
    AlreadyInRoom(String),
    #[error("room name is empty")]
    EmptyRoomName,
    #[error("not in a room")]
    NotInRoom,
    #[error("signaling connection is closed")]
    Disconnected,
}
