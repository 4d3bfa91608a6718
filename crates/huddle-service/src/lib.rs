//! # huddle-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    DeleteMessageOutcome, DeliveryTarget, EditMessageOutcome, MembershipService, MessageService,
    NotificationDelivery, NotificationService, PresenceService, ReactionOutcome, ReactionService,
    SendMessageOutcome, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    StatusUpdateOutcome,
};
