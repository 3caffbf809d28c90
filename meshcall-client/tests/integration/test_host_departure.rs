use crate::integration::init_tracing;
use crate::utils::TestServer;
use meshcall_client::ClientEvent;
use meshcall_core::ServerMessage;

#[tokio::test]
async fn test_disconnecting_host_hands_over_the_room() {
    init_tracing();
    let server = TestServer::start().await;
    let mut a = server.client().await;
    let mut b = server.client().await;
    let mut c = server.client().await;
    a.join("alpha").await;
    b.join("alpha").await;
    c.join("alpha").await;

    let a_id = a.peer_id.clone();
    drop(a);

    for client in [&mut b, &mut c] {
        client
            .wait_for(|e| {
                matches!(e, ClientEvent::Server(ServerMessage::PeerLeft { id }) if *id == a_id)
            })
            .await;
    }
    let b_id = b.peer_id.clone();
    c.wait_for(|e| {
        matches!(e, ClientEvent::Server(ServerMessage::HostChanged { host_id }) if *host_id == b_id)
    })
    .await;
}

#[tokio::test]
async fn test_leave_lets_client_rejoin() {
    init_tracing();
    let server = TestServer::start().await;
    let mut a = server.client().await;
    let mut b = server.client().await;
    a.join("alpha").await;
    b.join("alpha").await;

    b.handle.leave().unwrap();
    let b_id = b.peer_id.clone();
    a.wait_for(|e| {
        matches!(e, ClientEvent::Server(ServerMessage::PeerLeft { id }) if *id == b_id)
    })
    .await;

    let ServerMessage::Joined { members, .. } = b.join("alpha").await else {
        panic!("B was not readmitted");
    };
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].id, a.peer_id);
}
