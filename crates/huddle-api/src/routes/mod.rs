//! Route definitions
//!
//! REST routes organized by domain and mounted under /api/v1. The
//! WebSocket gateway route is mounted separately by the server module.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{health, messages, notifications, reactions, users};
use crate::state::ApiState;

/// Create the main API router with all routes
pub fn create_router() -> Router<ApiState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<ApiState> {
    Router::new().route("/health", get(health::health_check))
}

fn api_v1_routes() -> Router<ApiState> {
    Router::new()
        .merge(user_routes())
        .merge(message_routes())
        .merge(notification_routes())
}

/// User and presence routes
fn user_routes() -> Router<ApiState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me/status", put(users::update_status))
        .route("/users/@me/dms/:user_id/messages", get(messages::get_dm_messages))
        .route("/users/:user_id", get(users::get_user))
}

/// Message and reaction routes
fn message_routes() -> Router<ApiState> {
    Router::new()
        .route("/channels/:channel_id/messages", get(messages::get_channel_messages))
        .route("/messages/:message_id", patch(messages::update_message))
        .route("/messages/:message_id", delete(messages::delete_message))
        .route("/messages/:message_id/thread", get(messages::get_thread))
        .route("/messages/:message_id/reactions", get(reactions::get_reactions))
        .route(
            "/messages/:message_id/reactions/:emoji",
            put(reactions::add_reaction),
        )
        .route(
            "/messages/:message_id/reactions/:emoji",
            delete(reactions::remove_reaction),
        )
}

/// Notification and preference routes
fn notification_routes() -> Router<ApiState> {
    Router::new()
        .route("/users/@me/notifications", get(notifications::list_notifications))
        .route(
            "/users/@me/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route(
            "/users/@me/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/users/@me/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
        .route("/users/@me/preferences", put(notifications::set_preference))
        .route(
            "/users/@me/workspaces/:workspace_id/preferences",
            get(notifications::list_preferences),
        )
}
