//! Client -> server events

use huddle_core::Snowflake;
use huddle_service::dto::SendMessageRequest;
use serde::Deserialize;

/// Events a client may send over the socket
///
/// Reactions and read-state changes ride the REST surface instead.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinWorkspace {
        workspace_id: Snowflake,
    },
    JoinChannel {
        channel_id: Snowflake,
    },
    LeaveChannel {
        channel_id: Snowflake,
        /// Carried by clients for symmetry with join_channel; leaving
        /// only needs the channel
        #[serde(default)]
        workspace_id: Option<Snowflake>,
    },
    SendMessage(SendMessageRequest),
    StartTyping(TypingTarget),
    StopTyping(TypingTarget),
}

impl ClientEvent {
    /// Parse an event from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Where a typing signal is aimed
///
/// Exactly one of the fields must be set; the typing handler rejects
/// anything else.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TypingTarget {
    pub channel_id: Option<Snowflake>,
    pub recipient_id: Option<Snowflake>,
}
