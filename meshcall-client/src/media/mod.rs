use async_trait::async_trait;
use thiserror::Error;

/// What to do when local capture fails while joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaPolicy {
    /// Join anyway and only receive.
    #[default]
    MediaLess,
    /// Refuse to join; the caller decides whether to start over.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("capture permission denied")]
    PermissionDenied,
    #[error("no capture device available")]
    Unavailable,
    #[error("{0}")]
    Other(String),
}

/// Local capture layer. The engine only asks whether media could be
/// acquired; tracks themselves are handed to the transport factory.
#[async_trait]
pub trait MediaCapture: Send + Sync {
    async fn acquire(&self) -> Result<(), MediaError>;
}

/// A client without capture devices.
pub struct NoCapture;

#[async_trait]
impl MediaCapture for NoCapture {
    async fn acquire(&self) -> Result<(), MediaError> {
        Err(MediaError::Unavailable)
    }
}
