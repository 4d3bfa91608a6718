//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod error;
pub mod membership;
pub mod message;
pub mod notification;
pub mod presence;
pub mod reaction;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use message::{
    DeleteMessageOutcome, DeliveryTarget, EditMessageOutcome, MessageService,
    NotificationDelivery, SendMessageOutcome,
};
pub use notification::NotificationService;
pub use presence::{PresenceService, StatusUpdateOutcome};
pub use reaction::{ReactionOutcome, ReactionService};
