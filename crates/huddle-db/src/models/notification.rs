//! Notification database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: String,
    pub sender_id: i64,
    pub message_id: i64,
    pub channel_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Database model for notification_preferences table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationPreferenceModel {
    pub user_id: i64,
    pub workspace_id: i64,
    pub channel_id: Option<i64>,
    pub setting: String,
}
