//! Gateway wire events
//!
//! Both directions use externally tagged unions: a `type` discriminator and
//! a `data` payload, snake_case on the wire.

mod client;
mod server;

pub use client::{ClientEvent, TypingTarget};
pub use server::ServerEvent;
