//! Session registry
//!
//! One live connection per user: registering while a session already exists
//! evicts the earlier one. All maps are DashMaps, so registration, room
//! changes, and fan-out can race freely with connects and disconnects.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use huddle_core::Snowflake;
use tokio::sync::mpsc;

use crate::events::ServerEvent;
use crate::registry::{Connection, Room};

/// Registry of live sessions and their room subscriptions
pub struct SessionRegistry {
    /// Live connection per user
    connections: DashMap<Snowflake, Arc<Connection>>,

    /// Room to subscribed user IDs
    rooms: DashMap<Room, HashSet<Snowflake>>,
}

impl SessionRegistry {
    /// Create a new registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a session for a user
    ///
    /// Returns the new connection and, if the user was already connected,
    /// the evicted one. The evicted session's room subscriptions are
    /// dropped here so its late cleanup cannot touch the new session.
    pub fn register(
        &self,
        user_id: Snowflake,
        sender: mpsc::Sender<ServerEvent>,
    ) -> (Arc<Connection>, Option<Arc<Connection>>) {
        let connection = Connection::new(user_id, sender);
        let evicted = self.connections.insert(user_id, connection.clone());

        if let Some(old) = &evicted {
            self.clear_rooms(old);
            tracing::debug!(user_id = %user_id, old_session = %old.id(), "Session evicted");
        }

        tracing::debug!(user_id = %user_id, session_id = %connection.id(), "Session registered");

        (connection, evicted)
    }

    /// Forget a session
    ///
    /// Idempotent, and a no-op when a newer session has already replaced
    /// this one.
    pub fn forget(&self, connection: &Connection) {
        let removed = self
            .connections
            .remove_if(&connection.user_id(), |_, stored| {
                stored.id() == connection.id()
            });

        if removed.is_some() {
            self.clear_rooms(connection);
            tracing::debug!(
                user_id = %connection.user_id(),
                session_id = %connection.id(),
                "Session forgotten"
            );
        }
    }

    /// Subscribe a session to a room
    pub fn join_room(&self, connection: &Connection, room: Room) {
        connection.join_room(room);
        self.rooms
            .entry(room)
            .or_default()
            .insert(connection.user_id());
    }

    /// Unsubscribe a session from a room
    pub fn leave_room(&self, connection: &Connection, room: Room) {
        connection.leave_room(room);
        self.rooms.alter(&room, |_, mut members| {
            members.remove(&connection.user_id());
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());
    }

    /// Get a user's live connection
    pub fn get(&self, user_id: Snowflake) -> Option<Arc<Connection>> {
        self.connections.get(&user_id).map(|r| r.clone())
    }

    /// Check if a user has a live connection
    pub fn is_online(&self, user_id: Snowflake) -> bool {
        self.connections.contains_key(&user_id)
    }

    /// Get the live connections subscribed to a room
    pub fn room_members(&self, room: Room) -> Vec<Arc<Connection>> {
        self.rooms
            .get(&room)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|user_id| self.get(*user_id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of rooms with at least one subscriber
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn clear_rooms(&self, connection: &Connection) {
        for room in connection.rooms() {
            self.rooms.alter(&room, |_, mut members| {
                members.remove(&connection.user_id());
                members
            });
        }
        self.rooms.retain(|_, members| !members.is_empty());
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
