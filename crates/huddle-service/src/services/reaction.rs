//! Reaction service
//!
//! Adds and removes emoji reactions. Both operations are idempotent and
//! both end by re-aggregating the message's full reaction state, so every
//! broadcast carries an absolute summary rather than a delta.

use huddle_core::entities::ReactionSummary;
use huddle_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::membership::MembershipService;
use super::message::{DeliveryTarget, MessageService};

const MAX_EMOJI_LEN: usize = 32;

/// Result of adding or removing a reaction
#[derive(Debug)]
pub struct ReactionOutcome {
    pub message_id: Snowflake,
    pub target: DeliveryTarget,
    /// Full per-emoji state of the message after the change
    pub summary: Vec<ReactionSummary>,
}

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a reaction to a message
    ///
    /// Reacting with an emoji the user already placed is a no-op; the
    /// current summary is still returned.
    #[instrument(skip(self))]
    pub async fn add_reaction(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<ReactionOutcome> {
        validate_emoji(emoji)?;
        let target = self.authorize(user_id, message_id).await?;

        self.ctx
            .reaction_repo()
            .create(message_id, user_id, emoji)
            .await?;

        info!(message_id = %message_id, emoji = %emoji, "Reaction added");

        self.summarize(message_id, target).await
    }

    /// Remove a reaction from a message
    ///
    /// Removing a reaction that was never placed is a no-op.
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
        emoji: &str,
    ) -> ServiceResult<ReactionOutcome> {
        validate_emoji(emoji)?;
        let target = self.authorize(user_id, message_id).await?;

        self.ctx
            .reaction_repo()
            .delete(message_id, user_id, emoji)
            .await?;

        info!(message_id = %message_id, emoji = %emoji, "Reaction removed");

        self.summarize(message_id, target).await
    }

    /// Fetch the current reaction summary of a message
    #[instrument(skip(self))]
    pub async fn reactions(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<Vec<ReactionSummary>> {
        self.authorize(user_id, message_id).await?;
        Ok(self.ctx.reaction_repo().summarize(message_id).await?)
    }

    async fn authorize(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<DeliveryTarget> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let guard = MembershipService::new(self.ctx);
        guard.require_message_access(&message, user_id).await?;

        MessageService::new(self.ctx).delivery_target(&message).await
    }

    async fn summarize(
        &self,
        message_id: Snowflake,
        target: DeliveryTarget,
    ) -> ServiceResult<ReactionOutcome> {
        let summary = self.ctx.reaction_repo().summarize(message_id).await?;

        Ok(ReactionOutcome {
            message_id,
            target,
            summary,
        })
    }
}

fn validate_emoji(emoji: &str) -> ServiceResult<()> {
    if emoji.is_empty() {
        return Err(ServiceError::validation("emoji must not be empty"));
    }
    if emoji.len() > MAX_EMOJI_LEN {
        return Err(ServiceError::validation("emoji is too long"));
    }
    Ok(())
}
