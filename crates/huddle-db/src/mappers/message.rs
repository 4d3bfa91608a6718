//! Message entity <-> model mapper

use huddle_core::entities::{Destination, Message, ThreadState};
use huddle_core::error::DomainError;
use huddle_core::value_objects::Snowflake;

use crate::models::MessageModel;

impl TryFrom<MessageModel> for Message {
    type Error = DomainError;

    fn try_from(model: MessageModel) -> Result<Self, Self::Error> {
        let destination = match (model.channel_id, model.recipient_id) {
            (Some(channel_id), None) => Destination::Channel(Snowflake::new(channel_id)),
            (None, Some(recipient_id)) => Destination::Direct(Snowflake::new(recipient_id)),
            _ => {
                return Err(DomainError::InternalError(format!(
                    "message {} has inconsistent destination columns",
                    model.id
                )))
            }
        };

        let thread = match (model.thread_id, model.parent_id) {
            (Some(thread_id), Some(parent_id)) => ThreadState::Reply {
                thread_id: Snowflake::new(thread_id),
                parent_id: Snowflake::new(parent_id),
            },
            (None, None) => ThreadState::Root {
                reply_count: model.reply_count,
                last_reply_at: model.last_reply_at,
            },
            _ => {
                return Err(DomainError::InternalError(format!(
                    "message {} has inconsistent thread columns",
                    model.id
                )))
            }
        };

        Ok(Message {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            destination,
            content: model.content,
            thread,
            mentioned_user_ids: model.mentioned_user_ids.into_iter().map(Snowflake::new).collect(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert Message entity reference to values for database insertion
pub struct MessageInsert<'a> {
    pub id: i64,
    pub author_id: i64,
    pub channel_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub content: &'a str,
    pub thread_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub mentioned_user_ids: Vec<i64>,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        let (thread_id, parent_id) = match message.thread {
            ThreadState::Root { .. } => (None, None),
            ThreadState::Reply { thread_id, parent_id } => {
                (Some(thread_id.into_inner()), Some(parent_id.into_inner()))
            }
        };

        Self {
            id: message.id.into_inner(),
            author_id: message.author_id.into_inner(),
            channel_id: message.destination.channel_id().map(Snowflake::into_inner),
            recipient_id: message.destination.recipient_id().map(Snowflake::into_inner),
            content: &message.content,
            thread_id,
            parent_id,
            mentioned_user_ids: message
                .mentioned_user_ids
                .iter()
                .map(|s| s.into_inner())
                .collect(),
        }
    }
}
