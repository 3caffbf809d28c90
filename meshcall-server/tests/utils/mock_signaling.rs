use async_trait::async_trait;
use meshcall_core::{PeerId, ServerMessage};
use meshcall_server::SignalingOutput;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone)]
pub struct Delivery {
    pub to: PeerId,
    pub msg: ServerMessage,
}

/// Mock SignalingOutput that captures every outbound event.
#[derive(Clone)]
pub struct MockSignalingOutput {
    /// Channel to stream captured deliveries.
    tx: mpsc::UnboundedSender<Delivery>,
    /// Deliveries not yet taken by the test.
    pending: Arc<Mutex<Vec<Delivery>>>,
}

impl MockSignalingOutput {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let signaling = Self {
            tx,
            pending: Arc::new(Mutex::new(Vec::new())),
        };
        (signaling, rx)
    }

    /// Removes and returns everything delivered to `peer_id`, in order.
    pub async fn take_for(&self, peer_id: &PeerId) -> Vec<ServerMessage> {
        let mut pending = self.pending.lock().await;
        let (mine, rest): (Vec<_>, Vec<_>) = pending.drain(..).partition(|d| &d.to == peer_id);
        *pending = rest;
        mine.into_iter().map(|d| d.msg).collect()
    }

    pub async fn clear(&self) {
        self.pending.lock().await.clear();
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}

#[async_trait]
impl SignalingOutput for MockSignalingOutput {
    async fn send(&self, peer_id: &PeerId, msg: ServerMessage) {
        tracing::debug!("[MockSignaling] send to {}: {:?}", peer_id, msg);

        let delivery = Delivery {
            to: peer_id.clone(),
            msg,
        };
        self.pending.lock().await.push(delivery.clone());
        let _ = self.tx.send(delivery);
    }
}
