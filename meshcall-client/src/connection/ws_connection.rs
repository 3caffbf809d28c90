use crate::config::ClientConfig;
use crate::engine::{ClientEngine, ClientEvent, ClientHandle};
use crate::media::MediaCapture;
use crate::transport::TransportFactory;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use meshcall_core::{ClientMessage, ServerMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// An open signaling socket, exposed as a pair of typed channels.
pub struct SignalingConnection {
    pub outbound: mpsc::UnboundedSender<ClientMessage>,
    pub inbound: mpsc::UnboundedReceiver<ServerMessage>,
}

pub async fn connect(url: &str) -> Result<SignalingConnection> {
    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;
    info!("Connected to signaling server at {}", url);

    let (mut sender, mut receiver) = ws_stream.split();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
    let (in_tx, in_rx) = mpsc::unbounded_channel::<ServerMessage>();

    tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(j) => j,
                Err(e) => {
                    warn!("Failed to encode {:?}: {}", msg, e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(server_msg) => {
                        if in_tx.send(server_msg).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Ignoring unreadable server message: {}", e),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
        debug!("Signaling socket closed");
    });

    Ok(SignalingConnection {
        outbound: out_tx,
        inbound: in_rx,
    })
}

/// Connects and spawns a `ClientEngine` on the socket.
///
/// Dropping every clone of the returned handle stops the engine and closes
/// the socket.
pub async fn start_client(
    url: &str,
    config: ClientConfig,
    factory: Arc<dyn TransportFactory>,
    media: Arc<dyn MediaCapture>,
) -> Result<(
    ClientHandle,
    mpsc::UnboundedReceiver<ClientEvent>,
    JoinHandle<()>,
)> {
    let connection = connect(url).await?;
    let (engine, events) = ClientEngine::new(config, factory, media, connection.outbound);
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(engine.run(cmd_rx, connection.inbound));
    Ok((ClientHandle::new(cmd_tx), events, task))
}
