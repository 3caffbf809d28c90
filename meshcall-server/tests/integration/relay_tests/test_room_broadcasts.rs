use meshcall_core::{PeerId, ServerMessage};
use meshcall_server::{HubCommand, RoomPolicy};

use crate::integration::init_tracing;
use crate::utils::TestHub;

#[tokio::test]
async fn test_chat_reaches_everyone_including_sender() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b) = (PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b]).await;

    hub.apply(HubCommand::Chat {
        peer_id: b.clone(),
        text: "hello".to_owned(),
    })
    .await;

    let expected = vec![ServerMessage::Chat {
        sender_id: b.clone(),
        sender_name: "Participant 2".to_owned(),
        text: "hello".to_owned(),
    }];
    assert_eq!(hub.take(&a).await, expected);
    assert_eq!(hub.take(&b).await, expected);
}

#[tokio::test]
async fn test_blank_chat_is_dropped() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let a = PeerId::new();
    hub.populate("alpha", &[&a]).await;

    hub.apply(HubCommand::Chat {
        peer_id: a.clone(),
        text: "  \n".to_owned(),
    })
    .await;

    assert!(hub.signaling.is_empty().await);
}

#[tokio::test]
async fn test_rename_is_announced_to_others_and_used_in_chat() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b) = (PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b]).await;

    hub.apply(HubCommand::Rename {
        peer_id: b.clone(),
        name: "Bea".to_owned(),
    })
    .await;

    assert_eq!(
        hub.take(&a).await,
        vec![ServerMessage::Renamed {
            peer_id: b.clone(),
            new_name: "Bea".to_owned(),
        }]
    );
    assert!(hub.take(&b).await.is_empty());

    hub.apply(HubCommand::Chat {
        peer_id: b.clone(),
        text: "hi".to_owned(),
    })
    .await;
    assert!(matches!(
        hub.take(&a).await[0],
        ServerMessage::Chat { ref sender_name, .. } if sender_name == "Bea"
    ));
}

#[tokio::test]
async fn test_blank_rename_is_dropped() {
    init_tracing();
    let mut hub = TestHub::new(RoomPolicy::default());
    let (a, b) = (PeerId::new(), PeerId::new());
    hub.populate("alpha", &[&a, &b]).await;

    hub.apply(HubCommand::Rename {
        peer_id: a.clone(),
        name: " ".to_owned(),
    })
    .await;

    assert!(hub.signaling.is_empty().await);
}
