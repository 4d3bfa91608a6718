//! WebSocket handler
//!
//! Authenticates the upgrade request, runs the session's receive and send
//! tasks, and cleans up on disconnect.

use std::sync::Arc;

use axum::{
    extract::{ws::Message, ws::WebSocket, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use huddle_core::{DomainError, Snowflake};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::events::{ClientEvent, ServerEvent};
use crate::handlers::Dispatcher;
use crate::registry::{Connection, Room};
use crate::server::GatewayState;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    token: String,
}

/// WebSocket gateway handler
///
/// The bearer token rides a query parameter because browsers cannot set
/// headers on WebSocket upgrades. A bad token rejects the upgrade with
/// 401 before any event handler runs.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Response {
    let user_id = match authenticate(&state, &params.token).await {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::debug!(error = %error, "Gateway upgrade rejected");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    ws.on_upgrade(move |socket| handle_socket(state, user_id, socket))
        .into_response()
}

/// Verify the token and that its subject still exists
async fn authenticate(
    state: &GatewayState,
    token: &str,
) -> Result<Snowflake, huddle_service::ServiceError> {
    let user_id = state.services().jwt_service().authenticate(token)?;

    state
        .services()
        .user_repo()
        .find_by_id(user_id)
        .await?
        .ok_or(DomainError::UserNotFound(user_id))?;

    Ok(user_id)
}

/// Drive one upgraded WebSocket connection
async fn handle_socket(state: GatewayState, user_id: Snowflake, socket: WebSocket) {
    let (tx, mut rx) = mpsc::channel::<ServerEvent>(EVENT_BUFFER_SIZE);
    let (connection, evicted) = state.registry().register(user_id, tx);

    if let Some(old) = evicted {
        let _ = old
            .send(ServerEvent::Error {
                code: "SESSION_REPLACED".to_string(),
                message: "another session connected for this user".to_string(),
            })
            .await;
    }

    tracing::info!(user_id = %user_id, session_id = %connection.id(), "Gateway session opened");

    let (mut ws_sink, mut ws_stream) = socket.split();

    let recv_state = state.clone();
    let recv_connection = connection.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => match ClientEvent::from_json(&text) {
                    Ok(event) => {
                        Dispatcher::dispatch(&recv_state, &recv_connection, event).await;
                    }
                    Err(e) => {
                        tracing::debug!(
                            session_id = %recv_connection.id(),
                            error = %e,
                            "Undecodable client event"
                        );
                        let _ = recv_connection
                            .send(ServerEvent::Error {
                                code: "DECODE_ERROR".to_string(),
                                message: e.to_string(),
                            })
                            .await;
                    }
                },
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %recv_connection.id(), "Client closed connection");
                    break;
                }
                Ok(_) => {
                    // Binary frames and ping/pong are ignored
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %recv_connection.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let send_connection = connection.clone();
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::warn!(
                            session_id = %send_connection.id(),
                            "Failed to write to WebSocket"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to serialize server event");
                }
            }
        }
        let _ = ws_sink.close().await;
    });

    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    cleanup(&state, &connection).await;
}

/// Disconnect cleanup: announce offline, then forget the session
async fn cleanup(state: &GatewayState, connection: &Arc<Connection>) {
    let user_id = connection.user_id();

    if let Some(workspace_id) = connection.last_workspace() {
        state
            .fanout()
            .to_room(
                Room::Workspace(workspace_id),
                &ServerEvent::UserOffline {
                    workspace_id,
                    user_id,
                },
                Some(user_id),
            )
            .await;
    }

    state.registry().forget(connection);

    tracing::info!(user_id = %user_id, session_id = %connection.id(), "Gateway session closed");
}
