//! PostgreSQL repository implementations

mod channel;
mod error;
mod membership;
mod message;
mod notification;
mod preference;
mod reaction;
mod user;
mod workspace;

pub use channel::PgChannelRepository;
pub use membership::PgMembershipRepository;
pub use message::PgMessageRepository;
pub use notification::PgNotificationRepository;
pub use preference::PgPreferenceRepository;
pub use reaction::PgReactionRepository;
pub use user::PgUserRepository;
pub use workspace::PgWorkspaceRepository;
