//! Request extractors

mod auth;
mod history;

pub use auth::AuthUser;
pub use history::HistoryParams;
