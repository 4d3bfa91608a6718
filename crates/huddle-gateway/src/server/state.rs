//! Gateway state
//!
//! Shared dependencies for the WebSocket server.

use std::sync::Arc;

use huddle_service::ServiceContext;

use crate::broadcast::Fanout;
use crate::registry::SessionRegistry;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    services: Arc<ServiceContext>,
    registry: Arc<SessionRegistry>,
    fanout: Fanout,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(services: Arc<ServiceContext>, registry: Arc<SessionRegistry>) -> Self {
        let fanout = Fanout::new(registry.clone());
        Self {
            services,
            registry,
            fanout,
        }
    }

    /// Get the service context
    pub fn services(&self) -> &ServiceContext {
        &self.services
    }

    /// Get the session registry
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Get the fan-out helper
    pub fn fanout(&self) -> &Fanout {
        &self.fanout
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
