//! # huddle-api
//!
//! REST surface for the realtime engine, plus the server wiring that
//! mounts it next to the WebSocket gateway in one process.

pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run};
pub use state::ApiState;
