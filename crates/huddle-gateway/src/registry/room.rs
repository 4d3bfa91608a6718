//! Room identifiers

use huddle_core::Snowflake;

/// A broadcast room a session can subscribe to
///
/// Workspace rooms carry presence and status events; channel rooms carry
/// message traffic for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Workspace(Snowflake),
    Channel(Snowflake),
}
