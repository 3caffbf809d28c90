use crate::integration::init_tracing;
use crate::utils::TestServer;
use meshcall_client::ClientEvent;
use meshcall_core::ServerMessage;

#[tokio::test]
async fn test_locked_room_turns_newcomers_away() {
    init_tracing();
    let server = TestServer::start().await;
    let mut host = server.client().await;
    let mut late = server.client().await;
    host.join("alpha").await;

    host.handle.toggle_lock().unwrap();
    host.wait_for(|e| {
        matches!(
            e,
            ClientEvent::Server(ServerMessage::LockChanged { locked: true })
        )
    })
    .await;

    let reply = late.join("alpha").await;
    assert_eq!(
        reply,
        ServerMessage::RejectedLocked {
            room: "alpha".to_owned()
        }
    );

    // A rejected client is free to try another room.
    let reply = late.join("beta").await;
    assert!(matches!(reply, ServerMessage::Joined { .. }));
}

#[tokio::test]
async fn test_sixth_member_is_rejected() {
    init_tracing();
    let server = TestServer::start().await;
    let mut seated = Vec::new();
    for _ in 0..5 {
        let mut client = server.client().await;
        assert!(matches!(
            client.join("alpha").await,
            ServerMessage::Joined { .. }
        ));
        seated.push(client);
    }

    let mut sixth = server.client().await;
    assert_eq!(
        sixth.join("alpha").await,
        ServerMessage::RejectedFull {
            room: "alpha".to_owned()
        }
    );
}
