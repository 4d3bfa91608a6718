//! Typing signal relay
//!
//! Nothing is persisted and nothing expires server-side; clients age the
//! indicator out themselves.

use std::sync::Arc;

use huddle_service::{MembershipService, ServiceError, ServiceResult};

use crate::events::{ServerEvent, TypingTarget};
use crate::registry::{Connection, Room};
use crate::server::GatewayState;

/// Relay a typing start/stop signal
pub(super) async fn relay(
    state: &GatewayState,
    connection: &Arc<Connection>,
    target: TypingTarget,
    started: bool,
) -> ServiceResult<()> {
    let user_id = connection.user_id();

    match (target.channel_id, target.recipient_id) {
        (Some(channel_id), None) => {
            MembershipService::new(state.services())
                .require_channel_member(channel_id, user_id)
                .await?;

            let event = if started {
                ServerEvent::UserTyping {
                    channel_id,
                    user_id,
                }
            } else {
                ServerEvent::UserStopTyping {
                    channel_id,
                    user_id,
                }
            };
            state
                .fanout()
                .to_room(Room::Channel(channel_id), &event, Some(user_id))
                .await;
        }
        (None, Some(recipient_id)) => {
            let event = if started {
                ServerEvent::DmUserTyping { user_id }
            } else {
                ServerEvent::DmUserStopTyping { user_id }
            };
            // Offline counterpart: silent no-op
            state.fanout().to_user(recipient_id, event).await;
        }
        _ => {
            return Err(ServiceError::validation(
                "exactly one of channel_id and recipient_id must be set",
            ));
        }
    }

    Ok(())
}
