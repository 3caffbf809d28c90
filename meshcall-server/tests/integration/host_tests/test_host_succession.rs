use meshcall_core::{PeerId, ServerMessage};
use meshcall_server::{HubCommand, RoomPolicy};

use crate::integration::init_tracing;
use crate::utils::TestHub;

#[tokio::test]
async fn test_host_disconnect_promotes_next_member() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b, c) = (PeerId::new(), PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b, &c]).await;

    hub.disconnect(&a).await;

    let expected = vec![
        ServerMessage::PeerLeft { id: a.clone() },
        ServerMessage::HostChanged { host_id: b.clone() },
    ];
    assert_eq!(hub.take(&b).await, expected);
    assert_eq!(hub.take(&c).await, expected);
    assert!(hub.take(&a).await.is_empty());

    // Membership is now {B, C}: a newcomer is told about exactly those two.
    let d = PeerId::new();
    hub.join(&d, "alpha").await;
    let joined = hub.take(&d).await;
    let ServerMessage::Joined {
        members, host_id, ..
    } = &joined[0]
    else {
        panic!("expected joined");
    };
    let ids: Vec<_> = members.iter().map(|m| m.id.clone()).collect();
    assert_eq!(ids, vec![b.clone(), c]);
    assert_eq!(host_id, &b);
}

#[tokio::test]
async fn test_new_host_can_lock() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b) = (PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b]).await;

    hub.disconnect(&a).await;
    hub.signaling.clear().await;

    hub.apply(HubCommand::ToggleLock {
        peer_id: b.clone(),
    })
    .await;
    assert_eq!(
        hub.take(&b).await,
        vec![ServerMessage::LockChanged { locked: true }]
    );
}

#[tokio::test]
async fn test_guest_leave_does_not_change_host() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b, c) = (PeerId::new(), PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b, &c]).await;

    hub.apply(HubCommand::Leave {
        peer_id: b.clone(),
    })
    .await;

    assert_eq!(
        hub.take(&a).await,
        vec![ServerMessage::PeerLeft { id: b.clone() }]
    );
    assert_eq!(
        hub.take(&c).await,
        vec![ServerMessage::PeerLeft { id: b.clone() }]
    );
}

#[tokio::test]
async fn test_last_member_leaving_deletes_the_room() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let a = PeerId::new();
    hub.populate("alpha", &[&a]).await;
    hub.apply(HubCommand::ToggleLock {
        peer_id: a.clone(),
    })
    .await;
    hub.disconnect(&a).await;
    hub.signaling.clear().await;

    // A fresh room: unlocked, and the newcomer is host and participant 1.
    let b = PeerId::new();
    hub.join(&b, "alpha").await;
    assert_eq!(
        hub.take(&b).await,
        vec![ServerMessage::Joined {
            room: "alpha".to_owned(),
            assigned_name: "Participant 1".to_owned(),
            members: vec![],
            locked: false,
            host_id: b.clone(),
        }]
    );
}

#[tokio::test]
async fn test_left_peer_may_join_again_as_new_member() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b) = (PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b]).await;

    hub.apply(HubCommand::Leave {
        peer_id: b.clone(),
    })
    .await;
    hub.join(&b, "alpha").await;

    let events = hub.take(&b).await;
    assert!(matches!(events[0], ServerMessage::Joined { ref members, .. } if members.len() == 1));
}
