//! Reaction database models

use sqlx::FromRow;

/// Aggregated reaction row: one per emoji on a message
#[derive(Debug, Clone, FromRow)]
pub struct ReactionSummaryModel {
    pub emoji: String,
    pub count: i64,
    pub user_ids: Vec<i64>,
}
