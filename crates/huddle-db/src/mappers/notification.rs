//! Notification entity <-> model mappers

use huddle_core::entities::{
    Notification, NotificationKind, NotificationPreference, NotifySetting,
};
use huddle_core::error::DomainError;
use huddle_core::value_objects::Snowflake;

use crate::models::{NotificationModel, NotificationPreferenceModel};

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        let kind = NotificationKind::parse(&model.kind).ok_or_else(|| {
            DomainError::InternalError(format!("unknown notification kind: {}", model.kind))
        })?;

        Ok(Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            kind,
            sender_id: Snowflake::new(model.sender_id),
            message_id: Snowflake::new(model.message_id),
            channel_id: model.channel_id.map(Snowflake::new),
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<NotificationPreferenceModel> for NotificationPreference {
    type Error = DomainError;

    fn try_from(model: NotificationPreferenceModel) -> Result<Self, Self::Error> {
        let setting = NotifySetting::parse(&model.setting).ok_or_else(|| {
            DomainError::InternalError(format!("unknown notify setting: {}", model.setting))
        })?;

        Ok(NotificationPreference {
            user_id: Snowflake::new(model.user_id),
            workspace_id: Snowflake::new(model.workspace_id),
            channel_id: model.channel_id.map(Snowflake::new),
            setting,
        })
    }
}

/// Convert Notification entity reference to values for database insertion
pub struct NotificationInsert<'a> {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: &'a str,
    pub sender_id: i64,
    pub message_id: i64,
    pub channel_id: Option<i64>,
}

impl<'a> NotificationInsert<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            recipient_id: notification.recipient_id.into_inner(),
            kind: notification.kind.as_str(),
            sender_id: notification.sender_id.into_inner(),
            message_id: notification.message_id.into_inner(),
            channel_id: notification.channel_id.map(Snowflake::into_inner),
        }
    }
}
