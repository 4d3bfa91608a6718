//! Dispatcher tests: raw client events routed through the handler layer,
//! asserting what the caller and the rest of the room receive.

use huddle_gateway::handlers::Dispatcher;
use huddle_gateway::{ClientEvent, Room, ServerEvent, TypingTarget};
use integration_tests::{channel_message, TestEnv};

#[tokio::test]
async fn test_join_channel_denied_for_non_member() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();
    let carol = env.seed_user("carol");
    env.join_workspace(scene.workspace_id, carol);
    // carol is in the workspace but never joined the channel

    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    env.registry
        .join_room(&bob_conn, Room::Channel(scene.channel_id));
    let (carol_conn, mut carol_rx) = env.connect(carol);

    Dispatcher::dispatch(
        &state,
        &carol_conn,
        ClientEvent::JoinChannel {
            channel_id: scene.channel_id,
        },
    )
    .await;

    match carol_rx.try_recv().unwrap() {
        ServerEvent::Error { code, .. } => assert_eq!(code, "NOT_CHANNEL_MEMBER"),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(!carol_conn.in_room(Room::Channel(scene.channel_id)));
    // The room saw no join announcement
    assert!(bob_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_join_channel_announces_to_existing_members() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    env.registry
        .join_room(&alice_conn, Room::Channel(scene.channel_id));
    let (bob_conn, mut bob_rx) = env.connect(scene.bob);

    Dispatcher::dispatch(
        &state,
        &bob_conn,
        ClientEvent::JoinChannel {
            channel_id: scene.channel_id,
        },
    )
    .await;

    assert!(bob_conn.in_room(Room::Channel(scene.channel_id)));
    match alice_rx.try_recv().unwrap() {
        ServerEvent::UserJoinedChannel { user, .. } => assert_eq!(user.username, "bob"),
        other => panic!("unexpected event: {other:?}"),
    }
    // The joiner is excluded from its own announcement
    assert!(bob_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_send_message_via_dispatcher_reaches_room() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, _alice_rx) = env.connect(scene.alice);
    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    env.registry
        .join_room(&bob_conn, Room::Channel(scene.channel_id));

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::SendMessage(channel_message(
            scene.workspace_id,
            scene.channel_id,
            "via socket",
        )),
    )
    .await;

    match bob_rx.try_recv().unwrap() {
        ServerEvent::NewMessage(message) => assert_eq!(message.content, "via socket"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_channel_typing_relayed_to_room_excluding_sender() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    let room = Room::Channel(scene.channel_id);
    env.registry.join_room(&alice_conn, room);
    env.registry.join_room(&bob_conn, room);

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::StartTyping(TypingTarget {
            channel_id: Some(scene.channel_id),
            recipient_id: None,
        }),
    )
    .await;

    match bob_rx.try_recv().unwrap() {
        ServerEvent::UserTyping { user_id, .. } => assert_eq!(user_id, scene.alice),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(alice_rx.try_recv().is_err());

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::StopTyping(TypingTarget {
            channel_id: Some(scene.channel_id),
            recipient_id: None,
        }),
    )
    .await;

    assert!(matches!(
        bob_rx.try_recv().unwrap(),
        ServerEvent::UserStopTyping { .. }
    ));
}

#[tokio::test]
async fn test_channel_typing_denied_for_non_member() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();
    let carol = env.seed_user("carol");
    env.join_workspace(scene.workspace_id, carol);

    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    env.registry
        .join_room(&bob_conn, Room::Channel(scene.channel_id));
    let (carol_conn, mut carol_rx) = env.connect(carol);

    Dispatcher::dispatch(
        &state,
        &carol_conn,
        ClientEvent::StartTyping(TypingTarget {
            channel_id: Some(scene.channel_id),
            recipient_id: None,
        }),
    )
    .await;

    match carol_rx.try_recv().unwrap() {
        ServerEvent::Error { code, .. } => assert_eq!(code, "NOT_CHANNEL_MEMBER"),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(bob_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_dm_typing_relayed_to_counterpart_only() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    let (_bob_conn, mut bob_rx) = env.connect(scene.bob);

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::StartTyping(TypingTarget {
            channel_id: None,
            recipient_id: Some(scene.bob),
        }),
    )
    .await;

    match bob_rx.try_recv().unwrap() {
        ServerEvent::DmUserTyping { user_id } => assert_eq!(user_id, scene.alice),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(alice_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_ambiguous_typing_target_rejected() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::StartTyping(TypingTarget {
            channel_id: Some(scene.channel_id),
            recipient_id: Some(scene.bob),
        }),
    )
    .await;

    match alice_rx.try_recv().unwrap() {
        ServerEvent::Error { code, .. } => assert_eq!(code, "VALIDATION_ERROR"),
        other => panic!("unexpected event: {other:?}"),
    }

    Dispatcher::dispatch(
        &state,
        &alice_conn,
        ClientEvent::StopTyping(TypingTarget {
            channel_id: None,
            recipient_id: None,
        }),
    )
    .await;

    assert!(matches!(
        alice_rx.try_recv().unwrap(),
        ServerEvent::Error { .. }
    ));
}

#[tokio::test]
async fn test_leave_channel_announces_departure() {
    let env = TestEnv::new();
    let state = env.gateway_state();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    let (bob_conn, _bob_rx) = env.connect(scene.bob);
    let room = Room::Channel(scene.channel_id);
    env.registry.join_room(&alice_conn, room);
    env.registry.join_room(&bob_conn, room);

    Dispatcher::dispatch(
        &state,
        &bob_conn,
        ClientEvent::LeaveChannel {
            channel_id: scene.channel_id,
            workspace_id: None,
        },
    )
    .await;

    assert!(!bob_conn.in_room(room));
    match alice_rx.try_recv().unwrap() {
        ServerEvent::UserLeftChannel { user_id, .. } => assert_eq!(user_id, scene.bob),
        other => panic!("unexpected event: {other:?}"),
    }
}
