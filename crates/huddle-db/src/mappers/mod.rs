//! Entity <-> model mappers

mod channel;
mod member;
mod message;
mod notification;
mod reaction;
mod user;
mod workspace;

pub use message::MessageInsert;
pub use notification::NotificationInsert;
