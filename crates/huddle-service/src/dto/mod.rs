//! Data transfer objects
//!
//! Request DTOs carry validated client input; response DTOs shape entities
//! for JSON output (Snowflake IDs as strings).

mod mappers;
mod requests;
mod responses;

pub use requests::{
    EditMessageRequest, SendMessageRequest, SetPreferenceRequest, UpdateStatusRequest,
};
pub use responses::{
    MessageResponse, NotificationResponse, PreferenceResponse, ThreadUpdate, UserResponse,
};
