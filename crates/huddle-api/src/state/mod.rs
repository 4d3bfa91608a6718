//! Application state
//!
//! Shared state for the combined REST + gateway process. The gateway state
//! is embedded so the WebSocket route can be mounted on the same router,
//! and so REST mutations can fan events out to live sessions.

use std::sync::Arc;

use axum::extract::FromRef;
use huddle_common::{AppConfig, JwtService};
use huddle_gateway::{Fanout, GatewayState, SessionRegistry};
use huddle_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct ApiState {
    services: Arc<ServiceContext>,
    gateway: GatewayState,
    config: Arc<AppConfig>,
}

impl ApiState {
    /// Create a new ApiState
    pub fn new(
        services: Arc<ServiceContext>,
        registry: Arc<SessionRegistry>,
        config: AppConfig,
    ) -> Self {
        let gateway = GatewayState::new(services.clone(), registry);
        Self {
            services,
            gateway,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the fan-out helper for pushing events to live sessions
    pub fn fanout(&self) -> &Fanout {
        self.gateway.fanout()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.services.jwt_service()
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl FromRef<ApiState> for GatewayState {
    fn from_ref(state: &ApiState) -> Self {
        state.gateway.clone()
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}
