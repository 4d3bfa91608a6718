//! Membership guard service
//!
//! Centralizes the access checks every realtime operation runs before
//! touching a channel, thread, or direct conversation. Membership is read
//! from storage on every check; a revoked member is cut off the next time
//! any guarded operation runs.

use huddle_core::entities::{Channel, Destination, Message};
use huddle_core::{DomainError, Snowflake};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Membership guard service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    /// Create a new MembershipService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Require that a user is a member of a workspace
    #[instrument(skip(self))]
    pub async fn require_workspace_member(
        &self,
        workspace_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        if self
            .ctx
            .membership_repo()
            .is_workspace_member(workspace_id, user_id)
            .await?
        {
            Ok(())
        } else {
            Err(DomainError::NotWorkspaceMember.into())
        }
    }

    /// Require that a user is a member of a channel
    ///
    /// Channel membership implies workspace membership, so this is the only
    /// check channel operations need.
    #[instrument(skip(self))]
    pub async fn require_channel_member(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        if self
            .ctx
            .membership_repo()
            .is_channel_member(channel_id, user_id)
            .await?
        {
            Ok(())
        } else {
            Err(DomainError::NotChannelMember.into())
        }
    }

    /// Load a channel and require that the user is a member of it
    #[instrument(skip(self))]
    pub async fn require_channel_access(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Channel> {
        let channel = self
            .ctx
            .channel_repo()
            .find_by_id(channel_id)
            .await?
            .ok_or(DomainError::ChannelNotFound(channel_id))?;

        self.require_channel_member(channel_id, user_id).await?;

        Ok(channel)
    }

    /// Require that a user may see a message
    ///
    /// Channel messages require channel membership; direct messages are
    /// visible only to the two participants.
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn require_message_access(
        &self,
        message: &Message,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        match message.destination {
            Destination::Channel(channel_id) => {
                self.require_channel_member(channel_id, user_id).await
            }
            Destination::Direct(recipient_id) => {
                if user_id == message.author_id || user_id == recipient_id {
                    Ok(())
                } else {
                    Err(ServiceError::forbidden("not a participant in this conversation"))
                }
            }
        }
    }
}
