//! Integration test utilities for the huddle realtime core
//!
//! Drives the service and gateway layers against in-memory repositories,
//! so the full send/notify/fan-out flow runs without PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
