//! Workspace entity - top-level organizational container

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Workspace entity
///
/// Owned by the surrounding product's CRUD surface; the realtime core only
/// reads workspaces and their memberships.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    /// Create a new Workspace
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake) -> Self {
        Self {
            id,
            name,
            owner_id,
            created_at: Utc::now(),
        }
    }
}
