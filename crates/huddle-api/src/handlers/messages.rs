//! Message handlers
//!
//! History reads plus edit and delete. Mutations fan their events out to
//! live gateway sessions after the write commits.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use huddle_core::Snowflake;
use huddle_gateway::ServerEvent;
use huddle_service::dto::{EditMessageRequest, MessageResponse};
use huddle_service::MessageService;

use crate::extractors::{AuthUser, HistoryParams};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::ApiState;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Get channel history, newest first
///
/// GET /channels/{channel_id}/messages
pub async fn get_channel_messages(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let messages = MessageService::new(state.services())
        .channel_history(auth.user_id, channel_id, params.into())
        .await?;
    Ok(Json(messages))
}

/// Get direct-message history with another user, newest first
///
/// GET /users/@me/dms/{user_id}/messages
pub async fn get_dm_messages(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let other_id = parse_id(&user_id, "user_id")?;

    let messages = MessageService::new(state.services())
        .direct_history(auth.user_id, other_id, params.into())
        .await?;
    Ok(Json(messages))
}

/// Get a thread: root first, replies in creation order
///
/// GET /messages/{message_id}/thread
pub async fn get_thread(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let message_id = parse_id(&message_id, "message_id")?;

    let messages = MessageService::new(state.services())
        .thread(auth.user_id, message_id)
        .await?;
    Ok(Json(messages))
}

/// Edit a message
///
/// PATCH /messages/{message_id}
pub async fn update_message(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
    Json(request): Json<EditMessageRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let message_id = parse_id(&message_id, "message_id")?;

    let outcome = MessageService::new(state.services())
        .edit_message(auth.user_id, message_id, request)
        .await?;

    state
        .fanout()
        .to_target(
            outcome.target,
            &ServerEvent::MessageUpdated(outcome.message.clone()),
        )
        .await;

    Ok(Json(outcome.message))
}

/// Delete a message
///
/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<NoContent> {
    let message_id = parse_id(&message_id, "message_id")?;

    let outcome = MessageService::new(state.services())
        .delete_message(auth.user_id, message_id)
        .await?;

    state
        .fanout()
        .to_target(
            outcome.target,
            &ServerEvent::MessageDeleted {
                message_id: outcome.message_id,
            },
        )
        .await;

    Ok(NoContent)
}
