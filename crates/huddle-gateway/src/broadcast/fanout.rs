//! Fan-out helper
//!
//! Routes server events to rooms, single users, and delivery targets.
//! Delivery is best effort: a recipient whose channel is full or gone is
//! logged and skipped, never retried.

use std::sync::Arc;

use huddle_core::Snowflake;
use huddle_service::{DeliveryTarget, NotificationDelivery};

use crate::events::ServerEvent;
use crate::registry::{Room, SessionRegistry};

/// Event router over the registry
#[derive(Clone)]
pub struct Fanout {
    registry: Arc<SessionRegistry>,
}

impl Fanout {
    /// Create a new fan-out helper
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Send an event to every session in a room
    ///
    /// `exclude` skips one user, typically the event's originator.
    pub async fn to_room(
        &self,
        room: Room,
        event: &ServerEvent,
        exclude: Option<Snowflake>,
    ) -> usize {
        let mut sent = 0;

        for connection in self.registry.room_members(room) {
            if exclude == Some(connection.user_id()) {
                continue;
            }
            if connection.try_send(event.clone()) {
                sent += 1;
            } else {
                tracing::warn!(
                    user_id = %connection.user_id(),
                    "Dropping event for unreachable session"
                );
            }
        }

        tracing::trace!(room = ?room, sent, "Event sent to room");

        sent
    }

    /// Send an event to a user's live session, if any
    ///
    /// Offline users are a silent no-op.
    pub async fn to_user(&self, user_id: Snowflake, event: ServerEvent) -> bool {
        match self.registry.get(user_id) {
            Some(connection) => {
                if connection.try_send(event) {
                    true
                } else {
                    tracing::warn!(user_id = %user_id, "Dropping event for unreachable session");
                    false
                }
            }
            None => false,
        }
    }

    /// Send an event along a message delivery target
    ///
    /// Channel targets go to the channel room; direct targets go to both
    /// participants (once, for a note to self).
    pub async fn to_target(&self, target: DeliveryTarget, event: &ServerEvent) {
        match target {
            DeliveryTarget::Channel { channel_id, .. } => {
                self.to_room(Room::Channel(channel_id), event, None).await;
            }
            DeliveryTarget::Direct {
                author_id,
                recipient_id,
            } => {
                self.to_user(author_id, event.clone()).await;
                if recipient_id != author_id {
                    self.to_user(recipient_id, event.clone()).await;
                }
            }
        }
    }

    /// Push hydrated notifications to their recipients' live sessions
    pub async fn push_notifications(&self, deliveries: &[NotificationDelivery]) {
        for delivery in deliveries {
            self.to_user(
                delivery.recipient_id,
                ServerEvent::NewNotification(delivery.notification.clone()),
            )
            .await;
        }
    }
}

impl std::fmt::Debug for Fanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fanout")
            .field("registry", &self.registry)
            .finish()
    }
}
