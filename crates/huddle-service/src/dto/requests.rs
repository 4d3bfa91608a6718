//! Request DTOs for API and gateway operations
//!
//! All request DTOs implement `Deserialize`; those with free-form fields
//! also implement `Validate` for input validation.

use huddle_core::entities::NotifySetting;
use huddle_core::value_objects::Snowflake;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Message Requests
// ============================================================================

/// Send a message into a channel or to a direct recipient
///
/// Exactly one of `channel_id`/`recipient_id` must be set; the service
/// rejects anything else before touching storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub workspace_id: Snowflake,

    pub channel_id: Option<Snowflake>,

    pub recipient_id: Option<Snowflake>,

    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,

    /// Replying to an existing message puts this one in its thread
    pub parent_id: Option<Snowflake>,
}

/// Edit a message's content
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Content must be 1-4000 characters"))]
    pub content: String,
}

// ============================================================================
// Presence Requests
// ============================================================================

/// Update the caller's custom status
///
/// Both fields `None` clears the status.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(max = 100, message = "Status text must be at most 100 characters"))]
    pub status_text: Option<String>,

    #[validate(length(max = 32, message = "Status emoji must be at most 32 characters"))]
    pub status_emoji: Option<String>,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Set a per-channel (or workspace DM default) notification preference
#[derive(Debug, Clone, Deserialize)]
pub struct SetPreferenceRequest {
    pub workspace_id: Snowflake,

    /// `None` sets the workspace-level default for direct messages
    pub channel_id: Option<Snowflake>,

    pub setting: NotifySetting,
}
