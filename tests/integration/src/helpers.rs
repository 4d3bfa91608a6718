//! Test environment helpers
//!
//! Builds a `ServiceContext` over the in-memory store, plus a session
//! registry and fan-out so tests can observe what live sessions receive.

use std::sync::Arc;

use huddle_common::JwtService;
use huddle_core::entities::{Channel, User, Workspace, WorkspaceRole};
use huddle_core::{Snowflake, SnowflakeGenerator};
use huddle_gateway::{Connection, Fanout, GatewayState, ServerEvent, SessionRegistry};
use huddle_service::dto::SendMessageRequest;
use huddle_service::{ServiceContext, ServiceContextBuilder};
use tokio::sync::mpsc;

use crate::fixtures::TestStore;

/// Everything a test needs to drive the realtime core
pub struct TestEnv {
    pub store: Arc<TestStore>,
    pub ctx: Arc<ServiceContext>,
    pub registry: Arc<SessionRegistry>,
    pub fanout: Fanout,
    ids: SnowflakeGenerator,
}

impl TestEnv {
    pub fn new() -> Self {
        let store = Arc::new(TestStore::default());

        let ctx = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .workspace_repo(store.clone())
            .channel_repo(store.clone())
            .membership_repo(store.clone())
            .message_repo(store.clone())
            .reaction_repo(store.clone())
            .notification_repo(store.clone())
            .preference_repo(store.clone())
            .jwt_service(Arc::new(JwtService::new("integration-test-secret", 3600)))
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
            .build()
            .expect("all dependencies provided");

        let registry = SessionRegistry::new_shared();
        let fanout = Fanout::new(registry.clone());

        Self {
            store,
            ctx: Arc::new(ctx),
            registry,
            fanout,
            // A different worker id than the context's generator, so seeded
            // ids never collide with service-generated ones
            ids: SnowflakeGenerator::new(2),
        }
    }

    pub fn next_id(&self) -> Snowflake {
        self.ids.generate()
    }

    /// Build a gateway state over this environment's services and registry
    pub fn gateway_state(&self) -> GatewayState {
        GatewayState::new(self.ctx.clone(), self.registry.clone())
    }

    pub fn seed_user(&self, username: &str) -> Snowflake {
        let id = self.next_id();
        self.store
            .insert_user(User::new(id, username.to_string(), username.to_string()));
        id
    }

    /// Create a workspace with the owner already joined as admin
    pub fn seed_workspace(&self, name: &str, owner_id: Snowflake) -> Snowflake {
        let id = self.next_id();
        self.store
            .insert_workspace(Workspace::new(id, name.to_string(), owner_id));
        self.store
            .add_workspace_member(id, owner_id, WorkspaceRole::Admin);
        id
    }

    pub fn seed_channel(&self, workspace_id: Snowflake, name: &str) -> Snowflake {
        let id = self.next_id();
        self.store
            .insert_channel(Channel::new(id, workspace_id, name.to_string()));
        id
    }

    pub fn join_workspace(&self, workspace_id: Snowflake, user_id: Snowflake) {
        self.store
            .add_workspace_member(workspace_id, user_id, WorkspaceRole::Member);
    }

    pub fn join_channel(&self, channel_id: Snowflake, user_id: Snowflake) {
        self.store.add_channel_member(channel_id, user_id);
    }

    /// Open a live session for a user, returning its event receiver
    pub fn connect(&self, user_id: Snowflake) -> (Arc<Connection>, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let (connection, _) = self.registry.register(user_id, tx);
        (connection, rx)
    }

    /// Seed the common two-user channel setup most tests start from
    pub fn channel_scene(&self) -> ChannelScene {
        let alice = self.seed_user("alice");
        let bob = self.seed_user("bob");
        let workspace_id = self.seed_workspace("acme", alice);
        self.join_workspace(workspace_id, bob);
        let channel_id = self.seed_channel(workspace_id, "general");
        self.join_channel(channel_id, alice);
        self.join_channel(channel_id, bob);

        ChannelScene {
            workspace_id,
            channel_id,
            alice,
            bob,
        }
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A workspace with one channel and two members, alice and bob
pub struct ChannelScene {
    pub workspace_id: Snowflake,
    pub channel_id: Snowflake,
    pub alice: Snowflake,
    pub bob: Snowflake,
}

pub fn channel_message(
    workspace_id: Snowflake,
    channel_id: Snowflake,
    content: &str,
) -> SendMessageRequest {
    SendMessageRequest {
        workspace_id,
        channel_id: Some(channel_id),
        recipient_id: None,
        content: content.to_string(),
        parent_id: None,
    }
}

pub fn direct_message(
    workspace_id: Snowflake,
    recipient_id: Snowflake,
    content: &str,
) -> SendMessageRequest {
    SendMessageRequest {
        workspace_id,
        channel_id: None,
        recipient_id: Some(recipient_id),
        content: content.to_string(),
        parent_id: None,
    }
}
