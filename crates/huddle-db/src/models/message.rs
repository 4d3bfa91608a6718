//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
///
/// Exactly one of `channel_id`/`recipient_id` is set. `thread_id` and
/// `parent_id` are set together on replies and null on roots; counters are
/// only meaningful on roots.
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub author_id: i64,
    pub channel_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub content: String,
    pub thread_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub reply_count: i32,
    pub last_reply_at: Option<DateTime<Utc>>,
    pub mentioned_user_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MessageModel {
    /// Check if this row is a thread reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.thread_id.is_some()
    }
}
