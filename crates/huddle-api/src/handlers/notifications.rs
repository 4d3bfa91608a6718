//! Notification handlers
//!
//! Feed reads, read-state transitions, and notification preferences.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use huddle_core::Snowflake;
use huddle_service::dto::{NotificationResponse, PreferenceResponse, SetPreferenceRequest};
use huddle_service::NotificationService;
use serde::{Deserialize, Serialize};

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::ApiState;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct FeedParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}

/// List the caller's recent notifications
///
/// GET /users/@me/notifications
pub async fn list_notifications(
    State(state): State<ApiState>,
    auth: AuthUser,
    Query(params): Query<FeedParams>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = NotificationService::new(state.services())
        .recent(auth.user_id, params.limit)
        .await?;
    Ok(Json(notifications))
}

/// Count the caller's unread notifications
///
/// GET /users/@me/notifications/unread-count
pub async fn unread_count(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let count = NotificationService::new(state.services())
        .unread_count(auth.user_id)
        .await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// Mark one notification as read
///
/// POST /users/@me/notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<NoContent> {
    let notification_id: Snowflake = notification_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))?;

    NotificationService::new(state.services())
        .mark_read(auth.user_id, notification_id)
        .await?;
    Ok(NoContent)
}

/// Mark all of the caller's notifications as read
///
/// POST /users/@me/notifications/read-all
pub async fn mark_all_read(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> ApiResult<Json<MarkAllReadResponse>> {
    let updated = NotificationService::new(state.services())
        .mark_all_read(auth.user_id)
        .await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

/// Set a notification preference
///
/// PUT /users/@me/preferences
pub async fn set_preference(
    State(state): State<ApiState>,
    auth: AuthUser,
    Json(request): Json<SetPreferenceRequest>,
) -> ApiResult<Json<PreferenceResponse>> {
    let preference = NotificationService::new(state.services())
        .set_preference(auth.user_id, request)
        .await?;
    Ok(Json(preference))
}

/// List the caller's preferences within a workspace
///
/// GET /users/@me/workspaces/{workspace_id}/preferences
pub async fn list_preferences(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(workspace_id): Path<String>,
) -> ApiResult<Json<Vec<PreferenceResponse>>> {
    let workspace_id: Snowflake = workspace_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid workspace_id format"))?;

    let preferences = NotificationService::new(state.services())
        .preferences(auth.user_id, workspace_id)
        .await?;
    Ok(Json(preferences))
}
