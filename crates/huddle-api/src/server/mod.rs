//! Server setup and initialization
//!
//! Wires configuration, the database pool, repositories, the service
//! context, and the session registry into one process serving both the
//! REST routes and the WebSocket gateway.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use huddle_common::{AppConfig, AppError, JwtService};
use huddle_core::SnowflakeGenerator;
use huddle_db::{
    create_pool, PgChannelRepository, PgMembershipRepository, PgMessageRepository,
    PgNotificationRepository, PgPreferenceRepository, PgReactionRepository, PgUserRepository,
    PgWorkspaceRepository,
};
use huddle_gateway::{gateway_handler, SessionRegistry};
use huddle_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::{create_router, health_routes};
use crate::state::ApiState;

/// Build the complete Axum application
///
/// The gateway route lives on the same router; its state is derived from
/// `ApiState` via `FromRef`.
pub fn create_app(state: ApiState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .merge(create_router())
        .merge(health_routes())
        .route("/gateway", get(gateway_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.cors.allowed_origins;

    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Initialize all dependencies and create ApiState
pub async fn create_app_state(config: AppConfig) -> Result<ApiState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = huddle_db::DatabaseConfig::new(config.database.url.clone())
        .pool_size(config.database.min_connections, config.database.max_connections);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let workspace_repo = Arc::new(PgWorkspaceRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let membership_repo = Arc::new(PgMembershipRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let reaction_repo = Arc::new(PgReactionRepository::new(pool.clone()));
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));
    let preference_repo = Arc::new(PgPreferenceRepository::new(pool));

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .workspace_repo(workspace_repo)
        .channel_repo(channel_repo)
        .membership_repo(membership_repo)
        .message_repo(message_repo)
        .reaction_repo(reaction_repo)
        .notification_repo(notification_repo)
        .preference_repo(preference_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let registry = SessionRegistry::new_shared();

    Ok(ApiState::new(
        Arc::new(service_context),
        registry,
        config,
    ))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("REST on http://{addr}/api/v1, gateway on ws://{addr}/gateway");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .server
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid server address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
