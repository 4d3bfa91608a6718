//! Gateway server wiring
//!
//! The WebSocket route is mounted by the API binary next to the REST
//! routes; this module only provides the router and handler.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new().route("/gateway", get(gateway_handler))
}
