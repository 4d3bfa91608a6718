//! Request handlers organized by domain

pub mod health;
pub mod messages;
pub mod notifications;
pub mod reactions;
pub mod users;
