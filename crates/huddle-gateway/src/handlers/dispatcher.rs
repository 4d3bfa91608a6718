//! Event dispatcher

use std::sync::Arc;

use crate::events::{ClientEvent, ServerEvent};
use crate::registry::Connection;
use crate::server::GatewayState;

use super::{message, rooms, typing};

/// Routes decoded client events to their handlers
pub struct Dispatcher;

impl Dispatcher {
    /// Handle one client event
    ///
    /// A handler failure never tears the connection down; it becomes an
    /// `error` event sent back to this session only.
    pub async fn dispatch(state: &GatewayState, connection: &Arc<Connection>, event: ClientEvent) {
        let result = match event {
            ClientEvent::JoinWorkspace { workspace_id } => {
                rooms::join_workspace(state, connection, workspace_id).await
            }
            ClientEvent::JoinChannel { channel_id } => {
                rooms::join_channel(state, connection, channel_id).await
            }
            ClientEvent::LeaveChannel { channel_id, .. } => {
                rooms::leave_channel(state, connection, channel_id).await
            }
            ClientEvent::SendMessage(request) => message::send(state, connection, request).await,
            ClientEvent::StartTyping(target) => {
                typing::relay(state, connection, target, true).await
            }
            ClientEvent::StopTyping(target) => {
                typing::relay(state, connection, target, false).await
            }
        };

        if let Err(error) = result {
            tracing::debug!(
                user_id = %connection.user_id(),
                error = %error,
                "Handler rejected event"
            );
            let _ = connection.send(ServerEvent::from_error(&error)).await;
        }
    }
}
