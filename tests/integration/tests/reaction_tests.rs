//! Reaction tests: idempotent add/remove and absolute summary convergence.

use huddle_core::Snowflake;
use huddle_service::{MessageService, ReactionService};
use integration_tests::{channel_message, ChannelScene, TestEnv};

async fn seeded_message(env: &TestEnv, scene: &ChannelScene) -> Snowflake {
    let outcome = MessageService::new(&env.ctx)
        .send_message(
            scene.alice,
            channel_message(scene.workspace_id, scene.channel_id, "react to me"),
        )
        .await
        .unwrap();
    outcome.message.id.parse().unwrap()
}

#[tokio::test]
async fn test_add_reaction_returns_full_summary() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;

    let outcome = ReactionService::new(&env.ctx)
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();

    assert_eq!(outcome.message_id, message_id);
    assert_eq!(outcome.summary.len(), 1);
    assert_eq!(outcome.summary[0].emoji, "👍");
    assert_eq!(outcome.summary[0].count, 1);
    assert_eq!(outcome.summary[0].user_ids, vec![scene.bob]);
}

#[tokio::test]
async fn test_duplicate_add_is_a_noop() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;
    let service = ReactionService::new(&env.ctx);

    service
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();
    let outcome = service
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();

    assert_eq!(outcome.summary[0].count, 1);
}

#[tokio::test]
async fn test_remove_missing_reaction_is_a_noop() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;

    let outcome = ReactionService::new(&env.ctx)
        .remove_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();

    assert!(outcome.summary.is_empty());
}

#[tokio::test]
async fn test_summary_groups_per_emoji() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;
    let service = ReactionService::new(&env.ctx);

    service
        .add_reaction(scene.alice, message_id, "👍")
        .await
        .unwrap();
    service
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();
    let outcome = service
        .add_reaction(scene.bob, message_id, "🎉")
        .await
        .unwrap();

    assert_eq!(outcome.summary.len(), 2);
    let thumbs = outcome.summary.iter().find(|s| s.emoji == "👍").unwrap();
    assert_eq!(thumbs.count, 2);
    let party = outcome.summary.iter().find(|s| s.emoji == "🎉").unwrap();
    assert_eq!(party.user_ids, vec![scene.bob]);
}

#[tokio::test]
async fn test_remove_leaves_other_reactions_intact() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;
    let service = ReactionService::new(&env.ctx);

    service
        .add_reaction(scene.alice, message_id, "👍")
        .await
        .unwrap();
    service
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();

    let outcome = service
        .remove_reaction(scene.alice, message_id, "👍")
        .await
        .unwrap();

    assert_eq!(outcome.summary.len(), 1);
    assert_eq!(outcome.summary[0].count, 1);
    assert_eq!(outcome.summary[0].user_ids, vec![scene.bob]);
}

#[tokio::test]
async fn test_reactions_require_message_access() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;

    let carol = env.seed_user("carol");
    env.join_workspace(scene.workspace_id, carol);

    let err = ReactionService::new(&env.ctx)
        .add_reaction(carol, message_id, "👀")
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "NOT_CHANNEL_MEMBER");
}

#[tokio::test]
async fn test_reactions_die_with_the_message() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;

    ReactionService::new(&env.ctx)
        .add_reaction(scene.bob, message_id, "👍")
        .await
        .unwrap();

    MessageService::new(&env.ctx)
        .delete_message(scene.alice, message_id)
        .await
        .unwrap();

    let err = ReactionService::new(&env.ctx)
        .reactions(scene.bob, message_id)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "UNKNOWN_MESSAGE");
}

#[tokio::test]
async fn test_empty_emoji_rejected() {
    let env = TestEnv::new();
    let scene = env.channel_scene();
    let message_id = seeded_message(&env, &scene).await;

    let err = ReactionService::new(&env.ctx)
        .add_reaction(scene.bob, message_id, "")
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
