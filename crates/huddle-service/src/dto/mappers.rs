//! Entity -> response DTO mappers

use huddle_core::entities::{Message, Notification, NotificationPreference, ThreadState, User};
use huddle_core::value_objects::Snowflake;

use super::responses::{
    MessageResponse, NotificationResponse, PreferenceResponse, ThreadUpdate, UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            avatar: user.avatar.clone(),
            status_text: user.status_text.clone(),
            status_emoji: user.status_emoji.clone(),
        }
    }
}

impl MessageResponse {
    /// Build a message response with its author attached
    pub fn new(message: &Message, author: &User) -> Self {
        let (reply_count, last_reply_at) = match message.thread {
            ThreadState::Root { reply_count, last_reply_at } => (Some(reply_count), last_reply_at),
            ThreadState::Reply { .. } => (None, None),
        };

        Self {
            id: message.id.to_string(),
            author: UserResponse::from(author),
            channel_id: message.destination.channel_id().map(|id| id.to_string()),
            recipient_id: message.destination.recipient_id().map(|id| id.to_string()),
            content: message.content.clone(),
            thread_id: message.thread_id().to_string(),
            parent_id: message.parent_id().map(|id| id.to_string()),
            reply_count,
            last_reply_at,
            mentioned_user_ids: message
                .mentioned_user_ids
                .iter()
                .map(Snowflake::to_string)
                .collect(),
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

impl ThreadUpdate {
    /// Build a thread update from a freshly loaded thread root
    ///
    /// Returns `None` if the message is not a root.
    pub fn from_root(root: &Message) -> Option<Self> {
        match root.thread {
            ThreadState::Root { reply_count, last_reply_at } => Some(Self {
                thread_id: root.id.to_string(),
                reply_count,
                last_reply_at,
            }),
            ThreadState::Reply { .. } => None,
        }
    }
}

impl NotificationResponse {
    /// Build a notification response with its sender attached
    pub fn new(notification: &Notification, sender: &User) -> Self {
        Self {
            id: notification.id.to_string(),
            recipient_id: notification.recipient_id.to_string(),
            kind: notification.kind,
            sender: UserResponse::from(sender),
            message_id: notification.message_id.to_string(),
            channel_id: notification.channel_id.map(|id| id.to_string()),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

impl From<&NotificationPreference> for PreferenceResponse {
    fn from(preference: &NotificationPreference) -> Self {
        Self {
            workspace_id: preference.workspace_id.to_string(),
            channel_id: preference.channel_id.map(|id| id.to_string()),
            setting: preference.setting,
        }
    }
}
