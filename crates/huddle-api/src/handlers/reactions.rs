//! Reaction handlers
//!
//! Reactions ride the REST surface; each mutation broadcasts the full
//! recomputed summary to the message audience.

use axum::{
    extract::{Path, State},
    Json,
};
use huddle_core::entities::ReactionSummary;
use huddle_core::Snowflake;
use huddle_gateway::ServerEvent;
use huddle_service::{ReactionOutcome, ReactionService};

use crate::extractors::AuthUser;
use crate::response::{ApiError, ApiResult};
use crate::state::ApiState;

fn parse_message_id(raw: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid message_id format"))
}

async fn broadcast(state: &ApiState, outcome: &ReactionOutcome) {
    state
        .fanout()
        .to_target(
            outcome.target,
            &ServerEvent::ReactionUpdated {
                message_id: outcome.message_id,
                reactions: outcome.summary.clone(),
            },
        )
        .await;
}

/// Add own reaction
///
/// PUT /messages/{message_id}/reactions/{emoji}
pub async fn add_reaction(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path((message_id, emoji)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ReactionSummary>>> {
    let message_id = parse_message_id(&message_id)?;

    let outcome = ReactionService::new(state.services())
        .add_reaction(auth.user_id, message_id, &emoji)
        .await?;

    broadcast(&state, &outcome).await;

    Ok(Json(outcome.summary))
}

/// Remove own reaction
///
/// DELETE /messages/{message_id}/reactions/{emoji}
pub async fn remove_reaction(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path((message_id, emoji)): Path<(String, String)>,
) -> ApiResult<Json<Vec<ReactionSummary>>> {
    let message_id = parse_message_id(&message_id)?;

    let outcome = ReactionService::new(state.services())
        .remove_reaction(auth.user_id, message_id, &emoji)
        .await?;

    broadcast(&state, &outcome).await;

    Ok(Json(outcome.summary))
}

/// Get the current reaction summary
///
/// GET /messages/{message_id}/reactions
pub async fn get_reactions(
    State(state): State<ApiState>,
    auth: AuthUser,
    Path(message_id): Path<String>,
) -> ApiResult<Json<Vec<ReactionSummary>>> {
    let message_id = parse_message_id(&message_id)?;

    let summary = ReactionService::new(state.services())
        .reactions(auth.user_id, message_id)
        .await?;
    Ok(Json(summary))
}
