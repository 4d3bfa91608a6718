//! User entity - represents a workspace user

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub display_name: String,
    pub avatar: Option<String>,
    pub status_text: Option<String>,
    pub status_emoji: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            display_name,
            avatar: None,
            status_text: None,
            status_emoji: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the custom status (text and emoji)
    pub fn set_status(&mut self, text: Option<String>, emoji: Option<String>) {
        self.status_text = text;
        self.status_emoji = emoji;
        self.updated_at = Utc::now();
    }

    /// Check if the user has a custom status set
    #[inline]
    pub fn has_status(&self) -> bool {
        self.status_text.is_some() || self.status_emoji.is_some()
    }
}
