//! Presence service
//!
//! Handles custom status updates and user lookups. Online/offline state
//! itself lives in the gateway's session registry; this service owns the
//! persistent part (status text and emoji) and tells the gateway which
//! workspaces to announce the change to.

use huddle_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{UpdateStatusRequest, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of a status update
#[derive(Debug)]
pub struct StatusUpdateOutcome {
    pub user: UserResponse,
    /// Workspaces whose online members should see the change
    pub workspace_ids: Vec<Snowflake>,
}

/// Presence service
pub struct PresenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PresenceService<'a> {
    /// Create a new PresenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Update the caller's custom status
    ///
    /// Passing neither text nor emoji clears the status.
    #[instrument(skip(self, request))]
    pub async fn update_status(
        &self,
        user_id: Snowflake,
        request: UpdateStatusRequest,
    ) -> ServiceResult<StatusUpdateOutcome> {
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        self.ctx
            .user_repo()
            .update_status(
                user_id,
                request.status_text.as_deref(),
                request.status_emoji.as_deref(),
            )
            .await?;

        user.set_status(request.status_text, request.status_emoji);

        info!(has_status = user.has_status(), "Status updated");

        let workspace_ids = self.ctx.workspace_repo().find_ids_by_user(user_id).await?;

        Ok(StatusUpdateOutcome {
            user: UserResponse::from(&user),
            workspace_ids,
        })
    }

    /// Fetch a user's profile
    #[instrument(skip(self))]
    pub async fn user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(UserResponse::from(&user))
    }

    /// List the workspaces a user belongs to
    ///
    /// The gateway uses this on connect to subscribe the session and
    /// announce the user online.
    #[instrument(skip(self))]
    pub async fn workspace_ids(&self, user_id: Snowflake) -> ServiceResult<Vec<Snowflake>> {
        Ok(self.ctx.workspace_repo().find_ids_by_user(user_id).await?)
    }
}
