//! Room join/leave handlers
//!
//! Joins re-validate membership against the store every time; a session
//! that lost its membership mid-flight is cut off at its next join.

use std::sync::Arc;

use huddle_core::Snowflake;
use huddle_service::{MembershipService, PresenceService, ServiceResult};

use crate::events::ServerEvent;
use crate::registry::{Connection, Room};
use crate::server::GatewayState;

/// Join a workspace room and announce the user online to it
pub(super) async fn join_workspace(
    state: &GatewayState,
    connection: &Arc<Connection>,
    workspace_id: Snowflake,
) -> ServiceResult<()> {
    let ctx = state.services();
    let user_id = connection.user_id();

    MembershipService::new(ctx)
        .require_workspace_member(workspace_id, user_id)
        .await?;
    let user = PresenceService::new(ctx).user(user_id).await?;

    let room = Room::Workspace(workspace_id);
    state.registry().join_room(connection, room);

    tracing::info!(user_id = %user_id, workspace_id = %workspace_id, "Joined workspace room");

    state
        .fanout()
        .to_room(
            room,
            &ServerEvent::UserOnline { workspace_id, user },
            Some(user_id),
        )
        .await;

    Ok(())
}

/// Join a channel room and announce it to the room
pub(super) async fn join_channel(
    state: &GatewayState,
    connection: &Arc<Connection>,
    channel_id: Snowflake,
) -> ServiceResult<()> {
    let ctx = state.services();
    let user_id = connection.user_id();

    MembershipService::new(ctx)
        .require_channel_access(channel_id, user_id)
        .await?;
    let user = PresenceService::new(ctx).user(user_id).await?;

    let room = Room::Channel(channel_id);
    state.registry().join_room(connection, room);

    tracing::info!(user_id = %user_id, channel_id = %channel_id, "Joined channel room");

    state
        .fanout()
        .to_room(
            room,
            &ServerEvent::UserJoinedChannel { channel_id, user },
            Some(user_id),
        )
        .await;

    Ok(())
}

/// Leave a channel room and announce the departure
pub(super) async fn leave_channel(
    state: &GatewayState,
    connection: &Arc<Connection>,
    channel_id: Snowflake,
) -> ServiceResult<()> {
    let user_id = connection.user_id();
    let room = Room::Channel(channel_id);

    state.registry().leave_room(connection, room);

    tracing::info!(user_id = %user_id, channel_id = %channel_id, "Left channel room");

    state
        .fanout()
        .to_room(
            room,
            &ServerEvent::UserLeftChannel {
                channel_id,
                user_id,
            },
            Some(user_id),
        )
        .await;

    Ok(())
}
