//! Notification entities - mention/new-DM notifications and preferences

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Mention,
    NewDm,
}

impl NotificationKind {
    /// String representation matching the database enum
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mention => "mention",
            Self::NewDm => "new_dm",
        }
    }

    /// Parse from the database representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mention" => Some(Self::Mention),
            "new_dm" => Some(Self::NewDm),
            _ => None,
        }
    }
}

/// Notification entity
///
/// Created as a side effect of message creation, in the same transaction.
/// Only the read flag ever mutates, and only unread -> read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub kind: NotificationKind,
    pub sender_id: Snowflake,
    pub message_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a mention notification
    pub fn mention(
        id: Snowflake,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        message_id: Snowflake,
        channel_id: Snowflake,
    ) -> Self {
        Self {
            id,
            recipient_id,
            kind: NotificationKind::Mention,
            sender_id,
            message_id,
            channel_id: Some(channel_id),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Create a new-direct-message notification
    pub fn new_dm(
        id: Snowflake,
        recipient_id: Snowflake,
        sender_id: Snowflake,
        message_id: Snowflake,
    ) -> Self {
        Self {
            id,
            recipient_id,
            kind: NotificationKind::NewDm,
            sender_id,
            message_id,
            channel_id: None,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Per-channel notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifySetting {
    All,
    Mentions,
    None,
}

impl NotifySetting {
    /// String representation matching the database enum
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mentions => "mentions",
            Self::None => "none",
        }
    }

    /// Parse from the database representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Self::All),
            "mentions" => Some(Self::Mentions),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// Per-user, per-channel notification preference
///
/// A null channel id is the user's default for direct messages within the
/// workspace. Preferences govern client-side muting only; the core still
/// creates and delivers every notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreference {
    pub user_id: Snowflake,
    pub workspace_id: Snowflake,
    pub channel_id: Option<Snowflake>,
    pub setting: NotifySetting,
}
