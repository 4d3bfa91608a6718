//! Domain traits (ports)

mod repositories;

pub use repositories::{
    ChannelRepository, HistoryQuery, MembershipRepository, MessageRepository,
    NotificationRepository, PreferenceRepository, ReactionRepository, RepoResult,
    UserRepository, WorkspaceRepository,
};
