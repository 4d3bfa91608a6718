//! Message send handler

use std::sync::Arc;

use huddle_service::dto::SendMessageRequest;
use huddle_service::{DeliveryTarget, MessageService, ServiceResult};

use crate::events::ServerEvent;
use crate::registry::Connection;
use crate::server::GatewayState;

/// Send a message, then fan out its events
///
/// Persistence happened atomically by the time anything is broadcast;
/// push failures after that point are logged inside the fan-out, never
/// rolled back.
pub(super) async fn send(
    state: &GatewayState,
    connection: &Arc<Connection>,
    request: SendMessageRequest,
) -> ServiceResult<()> {
    let outcome = MessageService::new(state.services())
        .send_message(connection.user_id(), request)
        .await?;

    let event = match outcome.target {
        DeliveryTarget::Channel { .. } => ServerEvent::NewMessage(outcome.message),
        DeliveryTarget::Direct { .. } => ServerEvent::NewDirectMessage(outcome.message),
    };
    state.fanout().to_target(outcome.target, &event).await;

    if let Some(update) = outcome.thread_update {
        state
            .fanout()
            .to_target(outcome.target, &ServerEvent::ThreadUpdated(update))
            .await;
    }

    state.fanout().push_notifications(&outcome.notifications).await;

    Ok(())
}
