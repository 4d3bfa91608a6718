//! Client event handlers
//!
//! One module per concern; the dispatcher routes decoded events and turns
//! any handler failure into an `error` event for the originating session.

mod dispatcher;
mod message;
mod rooms;
mod typing;

pub use dispatcher::Dispatcher;
