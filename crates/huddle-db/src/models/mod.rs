//! Database models - SQLx-compatible structs for PostgreSQL tables

mod channel;
mod member;
mod message;
mod notification;
mod reaction;
mod user;
mod workspace;

pub use channel::ChannelModel;
pub use member::{ChannelMemberModel, WorkspaceMemberModel};
pub use message::MessageModel;
pub use notification::{NotificationModel, NotificationPreferenceModel};
pub use reaction::ReactionSummaryModel;
pub use user::UserModel;
pub use workspace::WorkspaceModel;
