//! Membership entities - workspace-level and channel-level joins

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Workspace-level member role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceRole {
    Admin,
    Member,
    Guest,
}

impl WorkspaceRole {
    /// String representation matching the database enum
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Guest => "guest",
        }
    }

    /// Parse from the database representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "member" => Some(Self::Member),
            "guest" => Some(Self::Guest),
            _ => None,
        }
    }
}

/// Workspace membership record
///
/// Invariant: a user must hold workspace membership before any channel
/// membership within that workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceMember {
    pub workspace_id: Snowflake,
    pub user_id: Snowflake,
    pub role: WorkspaceRole,
    pub joined_at: DateTime<Utc>,
}

impl WorkspaceMember {
    /// Create a new workspace membership
    pub fn new(workspace_id: Snowflake, user_id: Snowflake, role: WorkspaceRole) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// Channel membership record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMember {
    pub channel_id: Snowflake,
    pub user_id: Snowflake,
    pub joined_at: DateTime<Utc>,
}

impl ChannelMember {
    /// Create a new channel membership
    pub fn new(channel_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            channel_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
