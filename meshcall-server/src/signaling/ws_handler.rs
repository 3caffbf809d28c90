use crate::hub::HubCommand;
use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use meshcall_core::{ClientMessage, PeerId, ServerMessage};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, service))
}

async fn handle_socket(socket: WebSocket, service: SignalingService) {
    let peer_id = PeerId::new();
    info!("New WebSocket connection: {}", peer_id);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let outputs = service.outputs();
    outputs.add_peer(peer_id.clone(), tx);
    outputs.send_signal(
        &peer_id,
        &ServerMessage::Welcome {
            peer_id: peer_id.clone(),
        },
    );
    outputs.send_signal(
        &peer_id,
        &ServerMessage::IceConfig {
            ice_servers: service.ice_servers(),
        },
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();
        let peer_id = peer_id.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(signal) => {
                            if !service.submit(into_command(&peer_id, signal)).await {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid ClientMessage from {}: {}", peer_id, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    service.outputs().remove_peer(&peer_id);
    service
        .submit(HubCommand::Disconnect {
            peer_id: peer_id.clone(),
        })
        .await;
    info!("WebSocket disconnected: {}", peer_id);
}

fn into_command(peer_id: &PeerId, msg: ClientMessage) -> HubCommand {
    let peer_id = peer_id.clone();
    match msg {
        ClientMessage::JoinRoom { room, display_name } => HubCommand::Join {
            peer_id,
            room,
            display_name,
        },
        ClientMessage::LeaveRoom => HubCommand::Leave { peer_id },
        ClientMessage::Relay { to, payload } => HubCommand::Relay {
            from: peer_id,
            to,
            payload,
        },
        ClientMessage::Rename { name } => HubCommand::Rename { peer_id, name },
        ClientMessage::ToggleLock => HubCommand::ToggleLock { peer_id },
        ClientMessage::Chat { text } => HubCommand::Chat { peer_id, text },
    }
}
