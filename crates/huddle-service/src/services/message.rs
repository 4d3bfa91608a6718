//! Message service
//!
//! Handles the full lifecycle of a message: validation, membership checks,
//! thread resolution, mention extraction, atomic persistence with
//! notifications, and the outcome the gateway fans out to live sessions.

use std::collections::HashMap;

use huddle_core::entities::{Destination, Message, Notification, User};
use huddle_core::traits::HistoryQuery;
use huddle_core::value_objects::mention_candidates;
use huddle_core::{DomainError, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    EditMessageRequest, MessageResponse, NotificationResponse, SendMessageRequest, ThreadUpdate,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::membership::MembershipService;

/// Where an event produced by a message operation should be delivered
///
/// Services compute the target; the gateway owns the actual session lookup
/// and fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryTarget {
    /// Broadcast to everyone subscribed to the channel
    Channel {
        channel_id: Snowflake,
        workspace_id: Snowflake,
    },
    /// Deliver to both direct-conversation participants
    Direct {
        author_id: Snowflake,
        recipient_id: Snowflake,
    },
}

/// A notification paired with the session it should be pushed to
#[derive(Debug)]
pub struct NotificationDelivery {
    pub recipient_id: Snowflake,
    pub notification: NotificationResponse,
}

/// Result of sending a message
#[derive(Debug)]
pub struct SendMessageOutcome {
    pub message: MessageResponse,
    pub target: DeliveryTarget,
    /// Fresh root counters if the message was a reply
    pub thread_update: Option<ThreadUpdate>,
    /// Notifications created alongside the message, for per-user push
    pub notifications: Vec<NotificationDelivery>,
}

/// Result of editing a message
#[derive(Debug)]
pub struct EditMessageOutcome {
    pub message: MessageResponse,
    pub target: DeliveryTarget,
}

/// Result of deleting a message
#[derive(Debug)]
pub struct DeleteMessageOutcome {
    pub message_id: Snowflake,
    pub target: DeliveryTarget,
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a message to a channel or direct recipient
    ///
    /// The message, its thread counter bump, and every notification it spawns
    /// are persisted in one transaction; either all of it lands or none.
    #[instrument(skip(self, request), fields(workspace_id = %request.workspace_id))]
    pub async fn send_message(
        &self,
        author_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<SendMessageOutcome> {
        request.validate()?;

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::UserNotFound(author_id))?;

        match (request.channel_id, request.recipient_id) {
            (Some(channel_id), None) => {
                self.send_to_channel(&author, channel_id, request).await
            }
            (None, Some(recipient_id)) => {
                self.send_direct(&author, recipient_id, request).await
            }
            _ => Err(ServiceError::validation(
                "exactly one of channel_id and recipient_id must be set",
            )),
        }
    }

    async fn send_to_channel(
        &self,
        author: &User,
        channel_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<SendMessageOutcome> {
        let guard = MembershipService::new(self.ctx);
        let channel = guard.require_channel_access(channel_id, author.id).await?;

        if channel.workspace_id != request.workspace_id {
            return Err(ServiceError::validation(
                "channel does not belong to the given workspace",
            ));
        }
        if !channel.is_writable() {
            return Err(DomainError::ChannelArchived.into());
        }

        // Resolve thread position from the parent, if replying
        let thread = match request.parent_id {
            Some(parent_id) => {
                let parent = self
                    .ctx
                    .message_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::MessageNotFound(parent_id))?;

                if parent.destination != Destination::Channel(channel_id) {
                    return Err(ServiceError::validation(
                        "parent message is not in this channel",
                    ));
                }
                Some((parent.thread_id(), parent_id))
            }
            None => None,
        };

        let message_id = self.ctx.generate_id();
        let mut message = match thread {
            Some((thread_id, parent_id)) => Message::new_reply(
                message_id,
                author.id,
                Destination::Channel(channel_id),
                request.content,
                thread_id,
                parent_id,
            ),
            None => Message::new(
                message_id,
                author.id,
                Destination::Channel(channel_id),
                request.content,
            ),
        };

        // Mentions resolve against workspace membership; unknown names and
        // the author's own name are dropped silently
        let mentioned = self.resolve_mentions(&message.content, channel.workspace_id, author.id).await?;
        message.mentioned_user_ids = mentioned.iter().map(|u| u.id).collect();

        let notifications: Vec<Notification> = mentioned
            .iter()
            .map(|user| {
                Notification::mention(
                    self.ctx.generate_id(),
                    user.id,
                    author.id,
                    message_id,
                    channel_id,
                )
            })
            .collect();

        self.ctx
            .message_repo()
            .create(&message, &notifications)
            .await?;

        info!(
            message_id = %message_id,
            channel_id = %channel_id,
            mentions = notifications.len(),
            "Message created"
        );

        let thread_update = self.load_thread_update(&message).await?;

        Ok(SendMessageOutcome {
            message: MessageResponse::new(&message, author),
            target: DeliveryTarget::Channel {
                channel_id,
                workspace_id: channel.workspace_id,
            },
            thread_update,
            notifications: deliveries(&notifications, author),
        })
    }

    async fn send_direct(
        &self,
        author: &User,
        recipient_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<SendMessageOutcome> {
        let guard = MembershipService::new(self.ctx);

        self.ctx
            .user_repo()
            .find_by_id(recipient_id)
            .await?
            .ok_or(DomainError::UserNotFound(recipient_id))?;

        // Both participants must belong to the workspace the conversation
        // lives in
        guard
            .require_workspace_member(request.workspace_id, author.id)
            .await?;
        guard
            .require_workspace_member(request.workspace_id, recipient_id)
            .await?;

        let thread = match request.parent_id {
            Some(parent_id) => {
                let parent = self
                    .ctx
                    .message_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::MessageNotFound(parent_id))?;

                if !same_direct_conversation(&parent, author.id, recipient_id) {
                    return Err(ServiceError::validation(
                        "parent message is not in this conversation",
                    ));
                }
                Some((parent.thread_id(), parent_id))
            }
            None => None,
        };

        let message_id = self.ctx.generate_id();
        let message = match thread {
            Some((thread_id, parent_id)) => Message::new_reply(
                message_id,
                author.id,
                Destination::Direct(recipient_id),
                request.content,
                thread_id,
                parent_id,
            ),
            None => Message::new(
                message_id,
                author.id,
                Destination::Direct(recipient_id),
                request.content,
            ),
        };

        // A note to self spawns no notification
        let notifications: Vec<Notification> = if recipient_id == author.id {
            Vec::new()
        } else {
            vec![Notification::new_dm(
                self.ctx.generate_id(),
                recipient_id,
                author.id,
                message_id,
            )]
        };

        self.ctx
            .message_repo()
            .create(&message, &notifications)
            .await?;

        info!(message_id = %message_id, recipient_id = %recipient_id, "Direct message created");

        let thread_update = self.load_thread_update(&message).await?;

        Ok(SendMessageOutcome {
            message: MessageResponse::new(&message, author),
            target: DeliveryTarget::Direct {
                author_id: author.id,
                recipient_id,
            },
            thread_update,
            notifications: deliveries(&notifications, author),
        })
    }

    /// Edit a message; only the author may do so
    #[instrument(skip(self, request))]
    pub async fn edit_message(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
        request: EditMessageRequest,
    ) -> ServiceResult<EditMessageOutcome> {
        request.validate()?;

        let mut message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.author_id != user_id {
            return Err(DomainError::NotMessageAuthor.into());
        }

        let guard = MembershipService::new(self.ctx);
        guard.require_message_access(&message, user_id).await?;

        message.edit(request.content);
        self.ctx.message_repo().update(&message).await?;

        info!(message_id = %message_id, "Message updated");

        let author = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let target = self.delivery_target(&message).await?;

        Ok(EditMessageOutcome {
            message: MessageResponse::new(&message, &author),
            target,
        })
    }

    /// Delete a message; only the author may do so
    ///
    /// The message's reactions go with it. Thread counters on the root are
    /// left untouched so surviving replies keep their context.
    #[instrument(skip(self))]
    pub async fn delete_message(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<DeleteMessageOutcome> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        if message.author_id != user_id {
            return Err(DomainError::NotMessageAuthor.into());
        }

        let target = self.delivery_target(&message).await?;

        self.ctx.message_repo().delete(message_id).await?;

        info!(message_id = %message_id, "Message deleted");

        Ok(DeleteMessageOutcome { message_id, target })
    }

    /// Fetch channel history, newest first
    #[instrument(skip(self))]
    pub async fn channel_history(
        &self,
        user_id: Snowflake,
        channel_id: Snowflake,
        query: HistoryQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let guard = MembershipService::new(self.ctx);
        guard.require_channel_access(channel_id, user_id).await?;

        let messages = self
            .ctx
            .message_repo()
            .find_by_channel(channel_id, query)
            .await?;

        self.with_authors(messages).await
    }

    /// Fetch the direct-message history between the caller and another user
    #[instrument(skip(self))]
    pub async fn direct_history(
        &self,
        user_id: Snowflake,
        other_id: Snowflake,
        query: HistoryQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        self.ctx
            .user_repo()
            .find_by_id(other_id)
            .await?
            .ok_or(DomainError::UserNotFound(other_id))?;

        let messages = self
            .ctx
            .message_repo()
            .find_direct(user_id, other_id, query)
            .await?;

        self.with_authors(messages).await
    }

    /// Fetch a thread: root first, replies in creation order
    ///
    /// Accepts any message in the thread and resolves to its root.
    #[instrument(skip(self))]
    pub async fn thread(
        &self,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or(DomainError::MessageNotFound(message_id))?;

        let guard = MembershipService::new(self.ctx);
        guard.require_message_access(&message, user_id).await?;

        let messages = self
            .ctx
            .message_repo()
            .find_thread(message.thread_id())
            .await?;

        self.with_authors(messages).await
    }

    /// Reload the thread root to pick up fresh counters after a reply
    async fn load_thread_update(&self, message: &Message) -> ServiceResult<Option<ThreadUpdate>> {
        let Some(_) = message.parent_id() else {
            return Ok(None);
        };

        let root = self
            .ctx
            .message_repo()
            .find_by_id(message.thread_id())
            .await?
            .ok_or(DomainError::MessageNotFound(message.thread_id()))?;

        Ok(ThreadUpdate::from_root(&root))
    }

    /// Compute the delivery target for a message's events
    pub(crate) async fn delivery_target(&self, message: &Message) -> ServiceResult<DeliveryTarget> {
        match message.destination {
            Destination::Channel(channel_id) => {
                let channel = self
                    .ctx
                    .channel_repo()
                    .find_by_id(channel_id)
                    .await?
                    .ok_or(DomainError::ChannelNotFound(channel_id))?;

                Ok(DeliveryTarget::Channel {
                    channel_id,
                    workspace_id: channel.workspace_id,
                })
            }
            Destination::Direct(recipient_id) => Ok(DeliveryTarget::Direct {
                author_id: message.author_id,
                recipient_id,
            }),
        }
    }

    async fn resolve_mentions(
        &self,
        content: &str,
        workspace_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<Vec<User>> {
        let candidates = mention_candidates(content);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let users = self
            .ctx
            .user_repo()
            .find_workspace_members_by_usernames(workspace_id, &candidates)
            .await?;

        Ok(users.into_iter().filter(|u| u.id != author_id).collect())
    }

    /// Attach author details to a batch of messages
    async fn with_authors(&self, messages: Vec<Message>) -> ServiceResult<Vec<MessageResponse>> {
        let mut authors: HashMap<Snowflake, User> = HashMap::new();

        for message in &messages {
            if !authors.contains_key(&message.author_id) {
                let author = self
                    .ctx
                    .user_repo()
                    .find_by_id(message.author_id)
                    .await?
                    .unwrap_or_else(|| deleted_user(message.author_id));
                authors.insert(message.author_id, author);
            }
        }

        Ok(messages
            .iter()
            .map(|message| {
                let author = &authors[&message.author_id];
                MessageResponse::new(message, author)
            })
            .collect())
    }
}

fn deliveries(notifications: &[Notification], sender: &User) -> Vec<NotificationDelivery> {
    notifications
        .iter()
        .map(|n| NotificationDelivery {
            recipient_id: n.recipient_id,
            notification: NotificationResponse::new(n, sender),
        })
        .collect()
}

/// Placeholder shown when a message's author no longer exists
pub(crate) fn deleted_user(id: Snowflake) -> User {
    User::new(id, "deleted-user".to_string(), "Deleted User".to_string())
}

fn same_direct_conversation(parent: &Message, author_id: Snowflake, recipient_id: Snowflake) -> bool {
    match parent.destination {
        Destination::Direct(parent_recipient) => {
            let pair = (parent.author_id, parent_recipient);
            pair == (author_id, recipient_id) || pair == (recipient_id, author_id)
        }
        Destination::Channel(_) => false,
    }
}
