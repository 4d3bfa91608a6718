//! Channel entity - a named conversation inside a workspace

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    pub workspace_id: Snowflake,
    pub name: String,
    pub is_private: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new Channel
    pub fn new(id: Snowflake, workspace_id: Snowflake, name: String) -> Self {
        Self {
            id,
            workspace_id,
            name,
            is_private: false,
            is_archived: false,
            created_at: Utc::now(),
        }
    }

    /// Check if the channel accepts new messages
    #[inline]
    pub fn is_writable(&self) -> bool {
        !self.is_archived
    }
}
