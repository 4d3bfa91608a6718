//! User handlers
//!
//! Profile lookups and custom status updates. Status changes are announced
//! to every workspace the user belongs to, not only the joined rooms.

use axum::{
    extract::{Path, State},
    Json,
};
use huddle_core::Snowflake;
use huddle_gateway::{Room, ServerEvent};
use huddle_service::dto::{UpdateStatusRequest, UserResponse};
use huddle_service::PresenceService;

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::ApiState;

/// Get the caller's profile
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = PresenceService::new(state.services())
        .user(auth.user_id)
        .await?;
    Ok(Json(user))
}

/// Get a user's profile
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<ApiState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user_id: Snowflake = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let user = PresenceService::new(state.services()).user(user_id).await?;
    Ok(Json(user))
}

/// Update the caller's custom status
///
/// PUT /users/@me/status
pub async fn update_status(
    State(state): State<ApiState>,
    auth: AuthUser,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<UserResponse>> {
    let outcome = PresenceService::new(state.services())
        .update_status(auth.user_id, request)
        .await?;

    let event = ServerEvent::UserStatusUpdated {
        user: outcome.user.clone(),
    };
    for workspace_id in outcome.workspace_ids {
        state
            .fanout()
            .to_room(Room::Workspace(workspace_id), &event, None)
            .await;
    }

    Ok(Json(outcome.user))
}
