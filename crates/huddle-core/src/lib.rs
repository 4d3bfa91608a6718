//! # huddle-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, ChannelMember, Destination, Message, Notification, NotificationKind,
    NotificationPreference, NotifySetting, Reaction, ReactionSummary, ThreadState, User,
    Workspace, WorkspaceMember, WorkspaceRole,
};
pub use error::DomainError;
pub use traits::{
    ChannelRepository, HistoryQuery, MembershipRepository, MessageRepository,
    NotificationRepository, PreferenceRepository, ReactionRepository, RepoResult,
    UserRepository, WorkspaceRepository,
};
pub use value_objects::{mention_candidates, Snowflake, SnowflakeGenerator, SnowflakeParseError};
