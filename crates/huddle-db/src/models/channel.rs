//! Channel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for channels table
#[derive(Debug, Clone, FromRow)]
pub struct ChannelModel {
    pub id: i64,
    pub workspace_id: i64,
    pub name: String,
    pub is_private: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}
