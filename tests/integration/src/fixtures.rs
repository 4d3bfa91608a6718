//! In-memory repository fixtures
//!
//! A single `TestStore` backs every repository trait, mirroring what the
//! Postgres layer does: message creation bumps thread-root counters and
//! persists notifications in the same step, reactions are idempotent, and
//! history reads come back newest first.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use huddle_core::entities::{
    Channel, Message, Notification, NotificationPreference, ReactionSummary, ThreadState, User,
    Workspace, WorkspaceMember, WorkspaceRole,
};
use huddle_core::traits::{
    ChannelRepository, HistoryQuery, MembershipRepository, MessageRepository,
    NotificationRepository, PreferenceRepository, ReactionRepository, RepoResult, UserRepository,
    WorkspaceRepository,
};
use huddle_core::{DomainError, Snowflake};
use parking_lot::Mutex;

/// Shared in-memory backing store for all repositories
#[derive(Default)]
pub struct TestStore {
    users: Mutex<HashMap<Snowflake, User>>,
    workspaces: Mutex<HashMap<Snowflake, Workspace>>,
    channels: Mutex<HashMap<Snowflake, Channel>>,
    workspace_members: Mutex<HashMap<(Snowflake, Snowflake), WorkspaceMember>>,
    channel_members: Mutex<HashMap<Snowflake, HashSet<Snowflake>>>,
    // BTreeMap keyed by snowflake keeps messages in creation order
    messages: Mutex<BTreeMap<Snowflake, Message>>,
    reactions: Mutex<Vec<(Snowflake, Snowflake, String)>>,
    notifications: Mutex<BTreeMap<Snowflake, Notification>>,
    preferences: Mutex<HashMap<PreferenceKey, NotificationPreference>>,
}

type PreferenceKey = (Snowflake, Snowflake, Option<Snowflake>);

impl TestStore {
    pub fn insert_user(&self, user: User) {
        self.users.lock().insert(user.id, user);
    }

    pub fn insert_workspace(&self, workspace: Workspace) {
        self.workspaces.lock().insert(workspace.id, workspace);
    }

    pub fn insert_channel(&self, channel: Channel) {
        self.channels.lock().insert(channel.id, channel);
    }

    pub fn add_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
        role: WorkspaceRole,
    ) {
        self.workspace_members.lock().insert(
            (workspace_id, user_id),
            WorkspaceMember::new(workspace_id, user_id, role),
        );
    }

    pub fn add_channel_member(&self, channel_id: Snowflake, user_id: Snowflake) {
        self.channel_members
            .lock()
            .entry(channel_id)
            .or_default()
            .insert(user_id);
    }

    pub fn remove_channel_member(&self, channel_id: Snowflake, user_id: Snowflake) {
        if let Some(members) = self.channel_members.lock().get_mut(&channel_id) {
            members.remove(&user_id);
        }
    }

    pub fn archive_channel(&self, channel_id: Snowflake) {
        if let Some(channel) = self.channels.lock().get_mut(&channel_id) {
            channel.is_archived = true;
        }
    }

    pub fn message(&self, id: Snowflake) -> Option<Message> {
        self.messages.lock().get(&id).cloned()
    }

    pub fn notification_ids_for(&self, recipient_id: Snowflake) -> Vec<Snowflake> {
        self.notifications
            .lock()
            .values()
            .filter(|n| n.recipient_id == recipient_id)
            .map(|n| n.id)
            .collect()
    }
}

#[async_trait]
impl UserRepository for TestStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.lock().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_workspace_members_by_usernames(
        &self,
        workspace_id: Snowflake,
        usernames: &[&str],
    ) -> RepoResult<Vec<User>> {
        let members = self.workspace_members.lock();
        Ok(self
            .users
            .lock()
            .values()
            .filter(|u| {
                usernames.contains(&u.username.as_str())
                    && members.contains_key(&(workspace_id, u.id))
            })
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Snowflake,
        status_text: Option<&str>,
        status_emoji: Option<&str>,
    ) -> RepoResult<()> {
        if let Some(user) = self.users.lock().get_mut(&id) {
            user.set_status(
                status_text.map(str::to_string),
                status_emoji.map(str::to_string),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl WorkspaceRepository for TestStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workspace>> {
        Ok(self.workspaces.lock().get(&id).cloned())
    }

    async fn find_ids_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .workspace_members
            .lock()
            .keys()
            .filter(|(_, member)| *member == user_id)
            .map(|(workspace_id, _)| *workspace_id)
            .collect())
    }
}

#[async_trait]
impl ChannelRepository for TestStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Channel>> {
        Ok(self.channels.lock().get(&id).cloned())
    }

    async fn find_by_workspace(&self, workspace_id: Snowflake) -> RepoResult<Vec<Channel>> {
        Ok(self
            .channels
            .lock()
            .values()
            .filter(|c| c.workspace_id == workspace_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MembershipRepository for TestStore {
    async fn find_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<WorkspaceMember>> {
        Ok(self
            .workspace_members
            .lock()
            .get(&(workspace_id, user_id))
            .cloned())
    }

    async fn is_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self
            .workspace_members
            .lock()
            .contains_key(&(workspace_id, user_id)))
    }

    async fn is_channel_member(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<bool> {
        Ok(self
            .channel_members
            .lock()
            .get(&channel_id)
            .is_some_and(|members| members.contains(&user_id)))
    }

    async fn channel_member_ids(&self, channel_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        Ok(self
            .channel_members
            .lock()
            .get(&channel_id)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl MessageRepository for TestStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        Ok(self.messages.lock().get(&id).cloned())
    }

    async fn create(&self, message: &Message, notifications: &[Notification]) -> RepoResult<()> {
        let mut messages = self.messages.lock();

        if let ThreadState::Reply { thread_id, .. } = message.thread {
            if let Some(root) = messages.get_mut(&thread_id) {
                if let ThreadState::Root {
                    reply_count,
                    last_reply_at,
                } = &mut root.thread
                {
                    *reply_count += 1;
                    *last_reply_at = Some(message.created_at);
                }
            }
        }

        messages.insert(message.id, message.clone());

        let mut stored = self.notifications.lock();
        for notification in notifications {
            stored.insert(notification.id, notification.clone());
        }

        Ok(())
    }

    async fn update(&self, message: &Message) -> RepoResult<()> {
        let mut messages = self.messages.lock();
        if !messages.contains_key(&message.id) {
            return Err(DomainError::MessageNotFound(message.id));
        }
        messages.insert(message.id, message.clone());
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        self.messages.lock().remove(&id);
        self.reactions
            .lock()
            .retain(|(message_id, _, _)| *message_id != id);
        Ok(())
    }

    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .values()
            .filter(|m| m.destination.channel_id() == Some(channel_id))
            .filter(|m| query.before.is_none_or(|before| m.id < before))
            .rev()
            .take(usize::try_from(query.limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_direct(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>> {
        Ok(self
            .messages
            .lock()
            .values()
            .filter(|m| {
                m.destination.recipient_id().is_some_and(|recipient| {
                    (m.author_id, recipient) == (user_a, user_b)
                        || (m.author_id, recipient) == (user_b, user_a)
                })
            })
            .filter(|m| query.before.is_none_or(|before| m.id < before))
            .rev()
            .take(usize::try_from(query.limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_thread(&self, thread_id: Snowflake) -> RepoResult<Vec<Message>> {
        let messages = self.messages.lock();
        let mut thread: Vec<Message> = messages.get(&thread_id).cloned().into_iter().collect();
        thread.extend(
            messages
                .values()
                .filter(|m| !m.is_root() && m.thread_id() == thread_id)
                .cloned(),
        );
        Ok(thread)
    }
}

#[async_trait]
impl ReactionRepository for TestStore {
    async fn create(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<()> {
        let mut reactions = self.reactions.lock();
        let entry = (message_id, user_id, emoji.to_string());
        if !reactions.contains(&entry) {
            reactions.push(entry);
        }
        Ok(())
    }

    async fn delete(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
        emoji: &str,
    ) -> RepoResult<()> {
        self.reactions
            .lock()
            .retain(|(m, u, e)| !(*m == message_id && *u == user_id && e == emoji));
        Ok(())
    }

    async fn summarize(&self, message_id: Snowflake) -> RepoResult<Vec<ReactionSummary>> {
        let reactions = self.reactions.lock();

        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<Snowflake>> = HashMap::new();
        for (_, user_id, emoji) in reactions.iter().filter(|(m, _, _)| *m == message_id) {
            groups
                .entry(emoji.clone())
                .or_insert_with(|| {
                    order.push(emoji.clone());
                    Vec::new()
                })
                .push(*user_id);
        }

        Ok(order
            .into_iter()
            .map(|emoji| {
                let user_ids = groups.remove(&emoji).unwrap_or_default();
                ReactionSummary {
                    count: user_ids.len() as i64,
                    user_ids,
                    emoji,
                }
            })
            .collect())
    }
}

#[async_trait]
impl NotificationRepository for TestStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>> {
        Ok(self.notifications.lock().get(&id).cloned())
    }

    async fn find_recent(
        &self,
        recipient_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .values()
            .filter(|n| n.recipient_id == recipient_id)
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .notifications
            .lock()
            .values()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: Snowflake) -> RepoResult<()> {
        match self.notifications.lock().get_mut(&id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(())
            }
            None => Err(DomainError::NotificationNotFound(id)),
        }
    }

    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64> {
        let mut changed = 0;
        for notification in self.notifications.lock().values_mut() {
            if notification.recipient_id == recipient_id && !notification.is_read {
                notification.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }
}

#[async_trait]
impl PreferenceRepository for TestStore {
    async fn upsert(&self, preference: &NotificationPreference) -> RepoResult<()> {
        self.preferences.lock().insert(
            (
                preference.user_id,
                preference.workspace_id,
                preference.channel_id,
            ),
            preference.clone(),
        );
        Ok(())
    }

    async fn find(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> RepoResult<Option<NotificationPreference>> {
        Ok(self
            .preferences
            .lock()
            .get(&(user_id, workspace_id, channel_id))
            .cloned())
    }

    async fn find_for_user(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
    ) -> RepoResult<Vec<NotificationPreference>> {
        Ok(self
            .preferences
            .lock()
            .values()
            .filter(|p| p.user_id == user_id && p.workspace_id == workspace_id)
            .cloned()
            .collect())
    }
}
