//! Individual WebSocket session

use std::collections::HashSet;
use std::sync::Arc;

use huddle_core::Snowflake;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::ServerEvent;
use crate::registry::Room;

/// A single authenticated WebSocket session
///
/// Authentication happens before the connection exists, so the user id is
/// immutable here. The session id distinguishes this connection from a
/// later one that evicts it.
pub struct Connection {
    id: String,
    user_id: Snowflake,

    /// Channel to the socket's send task
    sender: mpsc::Sender<ServerEvent>,

    /// Rooms this session is subscribed to
    rooms: RwLock<HashSet<Room>>,

    /// Most recently joined workspace, used for the offline announcement
    last_workspace: RwLock<Option<Snowflake>>,
}

impl Connection {
    /// Create a new session for an authenticated user
    pub fn new(user_id: Snowflake, sender: mpsc::Sender<ServerEvent>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            sender,
            rooms: RwLock::new(HashSet::new()),
            last_workspace: RwLock::new(None),
        })
    }

    /// Get the session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the authenticated user ID
    pub fn user_id(&self) -> Snowflake {
        self.user_id
    }

    /// Record a room subscription
    pub fn join_room(&self, room: Room) {
        self.rooms.write().insert(room);
        if let Room::Workspace(workspace_id) = room {
            *self.last_workspace.write() = Some(workspace_id);
        }
    }

    /// Drop a room subscription
    pub fn leave_room(&self, room: Room) {
        self.rooms.write().remove(&room);
    }

    /// Check a room subscription
    pub fn in_room(&self, room: Room) -> bool {
        self.rooms.read().contains(&room)
    }

    /// Snapshot the subscribed rooms
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.read().iter().copied().collect()
    }

    /// The workspace to announce user_offline to on disconnect
    pub fn last_workspace(&self) -> Option<Snowflake> {
        *self.last_workspace.read()
    }

    /// Queue an event for the socket's send task
    pub async fn send(
        &self,
        event: ServerEvent,
    ) -> Result<(), mpsc::error::SendError<ServerEvent>> {
        self.sender.send(event).await
    }

    /// Queue an event without waiting for buffer space
    ///
    /// Returns false when the session's buffer is full or its send task
    /// has gone away. Fan-out paths use this so one slow consumer cannot
    /// stall a broadcast.
    pub fn try_send(&self, event: ServerEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    /// Check if the socket's send task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
