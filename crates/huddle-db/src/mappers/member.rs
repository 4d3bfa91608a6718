//! Membership entity <-> model mappers

use huddle_core::entities::{ChannelMember, WorkspaceMember, WorkspaceRole};
use huddle_core::error::DomainError;
use huddle_core::value_objects::Snowflake;

use crate::models::{ChannelMemberModel, WorkspaceMemberModel};

impl TryFrom<WorkspaceMemberModel> for WorkspaceMember {
    type Error = DomainError;

    fn try_from(model: WorkspaceMemberModel) -> Result<Self, Self::Error> {
        let role = WorkspaceRole::parse(&model.role).ok_or_else(|| {
            DomainError::InternalError(format!("unknown workspace role: {}", model.role))
        })?;

        Ok(WorkspaceMember {
            workspace_id: Snowflake::new(model.workspace_id),
            user_id: Snowflake::new(model.user_id),
            role,
            joined_at: model.joined_at,
        })
    }
}

impl From<ChannelMemberModel> for ChannelMember {
    fn from(model: ChannelMemberModel) -> Self {
        ChannelMember {
            channel_id: Snowflake::new(model.channel_id),
            user_id: Snowflake::new(model.user_id),
            joined_at: model.joined_at,
        }
    }
}
