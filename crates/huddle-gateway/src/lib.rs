//! # huddle-gateway
//!
//! Realtime engine: WebSocket sessions, room subscriptions, and event
//! fan-out for live message delivery.

pub mod broadcast;
pub mod events;
pub mod handlers;
pub mod registry;
pub mod server;

pub use broadcast::Fanout;
pub use events::{ClientEvent, ServerEvent, TypingTarget};
pub use registry::{Connection, Room, SessionRegistry};
pub use server::{create_router, gateway_handler, GatewayState};
