//! Server -> client events

use huddle_core::entities::ReactionSummary;
use huddle_core::Snowflake;
use huddle_service::dto::{MessageResponse, NotificationResponse, ThreadUpdate, UserResponse};
use huddle_service::ServiceError;
use serde::Serialize;

/// Events the server pushes to connected clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    // Presence
    UserOnline {
        workspace_id: Snowflake,
        user: UserResponse,
    },
    UserOffline {
        workspace_id: Snowflake,
        user_id: Snowflake,
    },
    UserStatusUpdated {
        user: UserResponse,
    },

    // Room membership
    UserJoinedChannel {
        channel_id: Snowflake,
        user: UserResponse,
    },
    UserLeftChannel {
        channel_id: Snowflake,
        user_id: Snowflake,
    },

    // Messages
    NewMessage(MessageResponse),
    NewDirectMessage(MessageResponse),
    MessageUpdated(MessageResponse),
    MessageDeleted {
        message_id: Snowflake,
    },
    ThreadUpdated(ThreadUpdate),
    ReactionUpdated {
        message_id: Snowflake,
        reactions: Vec<ReactionSummary>,
    },

    // Typing
    UserTyping {
        channel_id: Snowflake,
        user_id: Snowflake,
    },
    UserStopTyping {
        channel_id: Snowflake,
        user_id: Snowflake,
    },
    DmUserTyping {
        user_id: Snowflake,
    },
    DmUserStopTyping {
        user_id: Snowflake,
    },

    // Notifications
    NewNotification(NotificationResponse),

    // Errors, sent to the originating connection only
    Error {
        code: String,
        message: String,
    },
}

impl ServerEvent {
    /// Serialize to the JSON wire form
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Build an error event from a service failure
    pub fn from_error(error: &ServiceError) -> Self {
        Self::Error {
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}
