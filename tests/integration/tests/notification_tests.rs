//! Notification feed, read-state, and preference tests.

use huddle_core::entities::{NotificationKind, NotifySetting};
use huddle_service::dto::SetPreferenceRequest;
use huddle_service::{MessageService, NotificationService};
use integration_tests::{channel_message, direct_message, TestEnv};

#[tokio::test]
async fn test_mention_lands_in_feed_unread() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "ping @bob"),
        )
        .await
        .unwrap();

    let service = NotificationService::new(&env.ctx);
    let feed = service.recent(scene.bob, None).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::Mention);
    assert_eq!(feed[0].sender.username, "alice");
    assert_eq!(feed[0].channel_id, Some(scene.channel_id.to_string()));
    assert!(!feed[0].is_read);

    assert_eq!(service.unread_count(scene.bob).await.unwrap(), 1);
    assert_eq!(service.unread_count(scene.alice).await.unwrap(), 0);
}

#[tokio::test]
async fn test_feed_is_newest_first_and_limited() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let messages = MessageService::new(&env.ctx);

    for i in 0..3 {
        messages
            .send_message(
                scene.alice,
                channel_message(scene.workspace_id, scene.channel_id, &format!("@bob {i}")),
            )
            .await
            .unwrap();
    }

    let feed = NotificationService::new(&env.ctx)
        .recent(scene.bob, Some(2))
        .await
        .unwrap();
    assert_eq!(feed.len(), 2);
    assert!(feed[0].created_at >= feed[1].created_at);
    let newer: huddle_core::Snowflake = feed[0].message_id.parse().unwrap();
    let older: huddle_core::Snowflake = feed[1].message_id.parse().unwrap();
    assert!(newer > older);
}

#[tokio::test]
async fn test_only_the_recipient_may_mark_read() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "hi @bob"),
        )
        .await
        .unwrap();

    let notification_id = env.store.notification_ids_for(scene.bob)[0];
    let service = NotificationService::new(&env.ctx);

    let err = service
        .mark_read(scene.alice, notification_id)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_NOTIFICATION_RECIPIENT");
    assert_eq!(service.unread_count(scene.bob).await.unwrap(), 1);

    service.mark_read(scene.bob, notification_id).await.unwrap();
    assert_eq!(service.unread_count(scene.bob).await.unwrap(), 0);

    // Marking again is harmless
    service.mark_read(scene.bob, notification_id).await.unwrap();
}

#[tokio::test]
async fn test_mark_all_read_reports_how_many_changed() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let messages = MessageService::new(&env.ctx);

    messages
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "one @bob"),
        )
        .await
        .unwrap();
    messages
        .send_message(
            scene.alice,
            direct_message(scene.workspace_id, scene.bob, "two"),
        )
        .await
        .unwrap();

    let service = NotificationService::new(&env.ctx);
    assert_eq!(service.mark_all_read(scene.bob).await.unwrap(), 2);
    assert_eq!(service.mark_all_read(scene.bob).await.unwrap(), 0);
    assert_eq!(service.unread_count(scene.bob).await.unwrap(), 0);
}

#[tokio::test]
async fn test_preference_upsert_and_effective_setting() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let service = NotificationService::new(&env.ctx);

    // Nothing stored yet: mentions is the default everywhere
    let setting = service
        .effective_setting(scene.bob, scene.workspace_id, Some(scene.channel_id))
        .await
        .unwrap();
    assert_eq!(setting, NotifySetting::Mentions);

    service
        .set_preference(
            scene.bob,
            SetPreferenceRequest {
                workspace_id: scene.workspace_id,
                channel_id: Some(scene.channel_id),
                setting: NotifySetting::None,
            },
        )
        .await
        .unwrap();

    let setting = service
        .effective_setting(scene.bob, scene.workspace_id, Some(scene.channel_id))
        .await
        .unwrap();
    assert_eq!(setting, NotifySetting::None);

    // The channel preference does not leak into the DM default
    let dm_default = service
        .effective_setting(scene.bob, scene.workspace_id, None)
        .await
        .unwrap();
    assert_eq!(dm_default, NotifySetting::Mentions);

    // Upsert replaces, never duplicates
    service
        .set_preference(
            scene.bob,
            SetPreferenceRequest {
                workspace_id: scene.workspace_id,
                channel_id: Some(scene.channel_id),
                setting: NotifySetting::All,
            },
        )
        .await
        .unwrap();
    let all = service
        .preferences(scene.bob, scene.workspace_id)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].setting, NotifySetting::All);
}

#[tokio::test]
async fn test_muting_never_suppresses_notification_creation() {
    let env = TestEnv::new();
    let scene = env.channel_scene();

    NotificationService::new(&env.ctx)
        .set_preference(
            scene.bob,
            SetPreferenceRequest {
                workspace_id: scene.workspace_id,
                channel_id: Some(scene.channel_id),
                setting: NotifySetting::None,
            },
        )
        .await
        .unwrap();

    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "urgent @bob"),
        )
        .await
        .unwrap();

    // The preference is advisory for clients; the row and the push both
    // still happen
    assert_eq!(outcome.notifications.len(), 1);
    assert_eq!(
        NotificationService::new(&env.ctx)
            .unread_count(scene.bob)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_set_preference_requires_membership() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let carol = env.seed_user("carol");

    let err = NotificationService::new(&env.ctx)
        .set_preference(
            carol,
            SetPreferenceRequest {
                workspace_id: scene.workspace_id,
                channel_id: None,
                setting: NotifySetting::All,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_WORKSPACE_MEMBER");

    // Workspace membership alone is not enough for a channel preference
    env.join_workspace(scene.workspace_id, carol);
    let err = NotificationService::new(&env.ctx)
        .set_preference(
            carol,
            SetPreferenceRequest {
                workspace_id: scene.workspace_id,
                channel_id: Some(scene.channel_id),
                setting: NotifySetting::All,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_CHANNEL_MEMBER");
}
