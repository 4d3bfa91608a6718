//! Session registry
//!
//! Tracks live WebSocket sessions and their room subscriptions.

mod connection;
mod room;
mod session_registry;

pub use connection::Connection;
pub use room::Room;
pub use session_registry::SessionRegistry;
