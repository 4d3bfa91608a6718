//! Reaction entity - represents an emoji reaction on a message

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Reaction entity
///
/// (message, user, emoji) is unique; a user holds at most one reaction per
/// (message, emoji) pair. Created on add, deleted on remove, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub message_id: Snowflake,
    pub user_id: Snowflake,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(message_id: Snowflake, user_id: Snowflake, emoji: String) -> Self {
        Self {
            message_id,
            user_id,
            emoji,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated per-emoji reaction state for a message
///
/// The full list (not a delta) is what gets broadcast after every add or
/// remove, so clients that missed an intermediate event converge anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSummary {
    pub emoji: String,
    pub count: i64,
    pub user_ids: Vec<Snowflake>,
}
