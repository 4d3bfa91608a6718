//! Notification service
//!
//! Reads the notification feed, manages read state, and stores per-channel
//! notification preferences. Preferences only steer client-side muting;
//! notification rows are created and delivered regardless of them.

use std::collections::HashMap;

use huddle_core::entities::{NotificationPreference, NotifySetting, User};
use huddle_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{NotificationResponse, PreferenceResponse, SetPreferenceRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::membership::MembershipService;
use super::message::deleted_user;

const MAX_FEED_LIMIT: i64 = 100;
const DEFAULT_FEED_LIMIT: i64 = 50;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the caller's most recent notifications, newest first
    #[instrument(skip(self))]
    pub async fn recent(
        &self,
        user_id: Snowflake,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_FEED_LIMIT);

        let notifications = self
            .ctx
            .notification_repo()
            .find_recent(user_id, limit)
            .await?;

        let mut senders: HashMap<Snowflake, User> = HashMap::new();
        for notification in &notifications {
            if !senders.contains_key(&notification.sender_id) {
                let sender = self
                    .ctx
                    .user_repo()
                    .find_by_id(notification.sender_id)
                    .await?
                    .unwrap_or_else(|| deleted_user(notification.sender_id));
                senders.insert(notification.sender_id, sender);
            }
        }

        Ok(notifications
            .iter()
            .map(|n| NotificationResponse::new(n, &senders[&n.sender_id]))
            .collect())
    }

    /// Count the caller's unread notifications
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.notification_repo().unread_count(user_id).await?)
    }

    /// Mark one notification as read; only its recipient may do so
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or(DomainError::NotificationNotFound(notification_id))?;

        if notification.recipient_id != user_id {
            return Err(DomainError::NotNotificationRecipient.into());
        }

        self.ctx.notification_repo().mark_read(notification_id).await?;

        info!(notification_id = %notification_id, "Notification marked read");

        Ok(())
    }

    /// Mark all of the caller's notifications as read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<u64> {
        let changed = self.ctx.notification_repo().mark_all_read(user_id).await?;

        info!(changed, "All notifications marked read");

        Ok(changed)
    }

    /// Set the caller's notification preference for a channel, or their
    /// direct-message default when no channel is given
    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn set_preference(
        &self,
        user_id: Snowflake,
        request: SetPreferenceRequest,
    ) -> ServiceResult<PreferenceResponse> {
        let guard = MembershipService::new(self.ctx);
        guard
            .require_workspace_member(request.workspace_id, user_id)
            .await?;

        if let Some(channel_id) = request.channel_id {
            let channel = guard.require_channel_access(channel_id, user_id).await?;
            if channel.workspace_id != request.workspace_id {
                return Err(ServiceError::validation(
                    "channel does not belong to the given workspace",
                ));
            }
        }

        let preference = NotificationPreference {
            user_id,
            workspace_id: request.workspace_id,
            channel_id: request.channel_id,
            setting: request.setting,
        };

        self.ctx.preference_repo().upsert(&preference).await?;

        info!(setting = preference.setting.as_str(), "Notification preference saved");

        Ok(PreferenceResponse::from(&preference))
    }

    /// Look up the preference that applies to a channel, falling back to the
    /// workspace default of `mentions` when none is stored
    #[instrument(skip(self))]
    pub async fn effective_setting(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<NotifySetting> {
        let stored = self
            .ctx
            .preference_repo()
            .find(user_id, workspace_id, channel_id)
            .await?;

        Ok(stored.map_or(NotifySetting::Mentions, |p| p.setting))
    }

    /// List all of the caller's preferences within a workspace
    #[instrument(skip(self))]
    pub async fn preferences(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
    ) -> ServiceResult<Vec<PreferenceResponse>> {
        let guard = MembershipService::new(self.ctx);
        guard.require_workspace_member(workspace_id, user_id).await?;

        let preferences = self
            .ctx
            .preference_repo()
            .find_for_user(user_id, workspace_id)
            .await?;

        Ok(preferences.iter().map(PreferenceResponse::from).collect())
    }
}
