//! End-to-end delivery tests: service outcomes pushed through the session
//! registry and fan-out, asserting what each live session actually receives.

use huddle_gateway::{Room, ServerEvent};
use huddle_service::dto::UpdateStatusRequest;
use huddle_service::{MessageService, PresenceService, ReactionService};
use integration_tests::{channel_message, direct_message, TestEnv};

#[tokio::test]
async fn test_channel_broadcast_reaches_subscribers_only() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let carol = env.seed_user("carol");

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    let (_carol_conn, mut carol_rx) = env.connect(carol);

    let room = Room::Channel(scene.channel_id);
    env.registry.join_room(&alice_conn, room);
    env.registry.join_room(&bob_conn, room);
    // carol is online but never joined the channel room

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "hello room"),
        )
        .await
        .unwrap();
    env.fanout
        .to_target(outcome.target, &ServerEvent::NewMessage(outcome.message))
        .await;

    assert!(matches!(
        alice_rx.try_recv().unwrap(),
        ServerEvent::NewMessage(_)
    ));
    match bob_rx.try_recv().unwrap() {
        ServerEvent::NewMessage(message) => assert_eq!(message.content, "hello room"),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(carol_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_mention_push_reaches_live_recipient_only() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let carol = env.seed_user("carol");
    env.join_workspace(scene.workspace_id, carol);
    env.join_channel(scene.channel_id, carol);

    // bob is online, carol is not
    let (_bob_conn, mut bob_rx) = env.connect(scene.bob);

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "fyi @bob @carol"),
        )
        .await
        .unwrap();
    assert_eq!(outcome.notifications.len(), 2);

    env.fanout.push_notifications(&outcome.notifications).await;

    match bob_rx.try_recv().unwrap() {
        ServerEvent::NewNotification(notification) => {
            assert_eq!(notification.recipient_id, scene.bob.to_string());
            assert_eq!(notification.sender.username, "alice");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    // No second event for bob; carol's copy was dropped silently
    assert!(bob_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_thread_update_broadcast_carries_fresh_counters() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    let (alice_conn, mut alice_rx) = env.connect(scene.alice);
    env.registry
        .join_room(&alice_conn, Room::Channel(scene.channel_id));

    let service = MessageService::new(&env.ctx);
    let root = service
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "root"),
        )
        .await
        .unwrap();

    let mut request = channel_message(scene.workspace_id, scene.channel_id, "reply");
    request.parent_id = Some(root.message.id.parse().unwrap());
    let reply = service.send_message(scene.bob, request).await.unwrap();

    let update = reply.thread_update.unwrap();
    env.fanout
        .to_target(reply.target, &ServerEvent::ThreadUpdated(update))
        .await;

    match alice_rx.try_recv().unwrap() {
        ServerEvent::ThreadUpdated(update) => {
            assert_eq!(update.thread_id, root.message.id);
            assert_eq!(update.reply_count, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_dm_delivery_reaches_both_participants() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    let (_alice_conn, mut alice_rx) = env.connect(scene.alice);
    let (_bob_conn, mut bob_rx) = env.connect(scene.bob);

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            direct_message(scene.workspace_id, scene.bob, "psst"),
        )
        .await
        .unwrap();
    env.fanout
        .to_target(
            outcome.target,
            &ServerEvent::NewDirectMessage(outcome.message),
        )
        .await;

    assert!(matches!(
        alice_rx.try_recv().unwrap(),
        ServerEvent::NewDirectMessage(_)
    ));
    assert!(matches!(
        bob_rx.try_recv().unwrap(),
        ServerEvent::NewDirectMessage(_)
    ));
}

#[tokio::test]
async fn test_note_to_self_is_delivered_once() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    let (_conn, mut rx) = env.connect(scene.alice);

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            direct_message(scene.workspace_id, scene.alice, "note"),
        )
        .await
        .unwrap();
    env.fanout
        .to_target(
            outcome.target,
            &ServerEvent::NewDirectMessage(outcome.message),
        )
        .await;

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_reaction_update_broadcast_is_absolute() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    env.registry
        .join_room(&bob_conn, Room::Channel(scene.channel_id));

    let sent = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "react"),
        )
        .await
        .unwrap();
    let message_id = sent.message.id.parse().unwrap();

    let outcome = ReactionService::new(&env.ctx)
        .add_reaction(scene.alice, message_id, "👍")
        .await
        .unwrap();
    env.fanout
        .to_target(
            outcome.target,
            &ServerEvent::ReactionUpdated {
                message_id: outcome.message_id,
                reactions: outcome.summary,
            },
        )
        .await;

    match bob_rx.try_recv().unwrap() {
        ServerEvent::ReactionUpdated {
            message_id: id,
            reactions,
        } => {
            assert_eq!(id, message_id);
            assert_eq!(reactions.len(), 1);
            assert_eq!(reactions[0].count, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_update_announced_to_every_workspace() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    // bob also shares a second workspace with alice
    let other_workspace = env.seed_workspace("side-project", scene.alice);
    env.join_workspace(other_workspace, scene.bob);

    let (bob_conn, mut bob_rx) = env.connect(scene.bob);
    env.registry
        .join_room(&bob_conn, Room::Workspace(other_workspace));

    let outcome = PresenceService::new(&env.ctx)
        .update_status(
            scene.alice,
            UpdateStatusRequest {
                status_text: Some("in a meeting".to_string()),
                status_emoji: Some(":calendar:".to_string()),
            },
        )
        .await
        .unwrap();
    assert!(outcome.workspace_ids.contains(&scene.workspace_id));
    assert!(outcome.workspace_ids.contains(&other_workspace));

    let event = ServerEvent::UserStatusUpdated {
        user: outcome.user.clone(),
    };
    for workspace_id in &outcome.workspace_ids {
        env.fanout
            .to_room(Room::Workspace(*workspace_id), &event, None)
            .await;
    }

    match bob_rx.try_recv().unwrap() {
        ServerEvent::UserStatusUpdated { user } => {
            assert_eq!(user.status_text.as_deref(), Some("in a meeting"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_replaced_session_no_longer_receives_room_events() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let room = Room::Channel(scene.channel_id);

    let (first_conn, mut first_rx) = env.connect(scene.bob);
    env.registry.join_room(&first_conn, room);

    // Reconnecting evicts the first session and drops its subscriptions
    let (second_conn, mut second_rx) = env.connect(scene.bob);
    env.registry.join_room(&second_conn, room);

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "after reconnect"),
        )
        .await
        .unwrap();
    env.fanout
        .to_target(outcome.target, &ServerEvent::NewMessage(outcome.message))
        .await;

    assert!(first_rx.try_recv().is_err());
    assert!(second_rx.try_recv().is_ok());
}
