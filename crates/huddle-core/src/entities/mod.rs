//! Domain entities - core business objects

mod channel;
mod member;
mod message;
mod notification;
mod reaction;
mod user;
mod workspace;

pub use channel::Channel;
pub use member::{ChannelMember, WorkspaceMember, WorkspaceRole};
pub use message::{Destination, Message, ThreadState};
pub use notification::{Notification, NotificationKind, NotificationPreference, NotifySetting};
pub use reaction::{Reaction, ReactionSummary};
pub use user::User;
pub use workspace::Workspace;
