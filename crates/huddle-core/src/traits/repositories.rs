//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Channel, Message, Notification, NotificationPreference, ReactionSummary, User, Workspace,
    WorkspaceMember,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Resolve usernames to workspace members
    ///
    /// Only returns users who are members of the given workspace; unknown
    /// names and non-members are silently dropped.
    async fn find_workspace_members_by_usernames(
        &self,
        workspace_id: Snowflake,
        usernames: &[&str],
    ) -> RepoResult<Vec<User>>;

    /// Update a user's custom status
    async fn update_status(
        &self,
        id: Snowflake,
        status_text: Option<&str>,
        status_emoji: Option<&str>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Workspace Repository
// ============================================================================

#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Find workspace by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workspace>>;

    /// List the workspace IDs a user belongs to
    async fn find_ids_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Channel Repository
// ============================================================================

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find channel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>>;

    /// List all channels in a workspace
    async fn find_by_workspace(&self, workspace_id: Snowflake) -> RepoResult<Vec<Channel>>;
}

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a workspace member record
    async fn find_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<WorkspaceMember>>;

    /// Check if user is a member of a workspace
    async fn is_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Check if user is a member of a channel
    async fn is_channel_member(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool>;

    /// List member user IDs of a channel
    async fn channel_member_ids(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// Pagination options for history queries
#[derive(Debug, Clone, Copy)]
pub struct HistoryQuery {
    pub limit: i64,
    pub before: Option<Snowflake>,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            before: None,
        }
    }
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Persist a message and its notifications atomically
    ///
    /// For a reply this also bumps the thread root's reply count and last
    /// reply timestamp. Either everything commits or nothing does.
    async fn create(&self, message: &Message, notifications: &[Notification]) -> RepoResult<()>;

    /// Update message content (edit)
    async fn update(&self, message: &Message) -> RepoResult<()>;

    /// Delete a message and its reactions
    ///
    /// Thread counters on the root are left untouched.
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// List messages in a channel, newest first
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>>;

    /// List direct messages between two users, newest first
    async fn find_direct(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>>;

    /// List a thread: the root followed by replies in creation order
    async fn find_thread(&self, thread_id: Snowflake) -> RepoResult<Vec<Message>>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Add a reaction; adding one that already exists is a no-op
    async fn create(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<()>;

    /// Remove a reaction; removing one that does not exist is a no-op
    async fn delete(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<()>;

    /// Aggregate the current reaction state of a message, per emoji
    async fn summarize(&self, message_id: Snowflake) -> RepoResult<Vec<ReactionSummary>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Find notification by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// List a user's most recent notifications, newest first
    async fn find_recent(&self, recipient_id: Snowflake, limit: i64)
        -> RepoResult<Vec<Notification>>;

    /// Count a user's unread notifications
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Mark a single notification as read
    async fn mark_read(&self, id: Snowflake) -> RepoResult<()>;

    /// Mark all of a user's notifications as read, returning how many changed
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Preference Repository
// ============================================================================

#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Insert or replace a notification preference
    async fn upsert(&self, preference: &NotificationPreference) -> RepoResult<()>;

    /// Find a preference for a (user, workspace, channel) key
    async fn find(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> RepoResult<Option<NotificationPreference>>;

    /// List all of a user's preferences within a workspace
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
    ) -> RepoResult<Vec<NotificationPreference>>;
}
