//! Message entity - a channel post or direct message with thread identity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Where a message is delivered: exactly one of channel or direct recipient.
///
/// Using a sum type instead of two nullable ids makes the "exactly one of
/// channelId/recipientId" invariant unrepresentable to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Posted into a channel
    Channel(Snowflake),
    /// Sent directly to another user
    Direct(Snowflake),
}

impl Destination {
    /// The channel id, if this is a channel message
    #[inline]
    pub fn channel_id(&self) -> Option<Snowflake> {
        match self {
            Self::Channel(id) => Some(*id),
            Self::Direct(_) => None,
        }
    }

    /// The recipient id, if this is a direct message
    #[inline]
    pub fn recipient_id(&self) -> Option<Snowflake> {
        match self {
            Self::Channel(_) => None,
            Self::Direct(id) => Some(*id),
        }
    }
}

/// Thread position of a message.
///
/// A root carries the counters; a reply carries its root and immediate
/// parent. A plain message is a `Root` with zero replies - thread-root
/// promotion happens lazily when the first reply arrives, but every message
/// has a thread identity from creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadState {
    /// Thread root (or a plain message that has not been replied to yet)
    Root {
        reply_count: i32,
        last_reply_at: Option<DateTime<Utc>>,
    },
    /// Reply within a thread
    Reply {
        thread_id: Snowflake,
        parent_id: Snowflake,
    },
}

impl ThreadState {
    /// A fresh root with no replies
    pub const fn new_root() -> Self {
        Self::Root {
            reply_count: 0,
            last_reply_at: None,
        }
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub destination: Destination,
    pub content: String,
    pub thread: ThreadState,
    /// Derived at creation from content + workspace membership; never input
    pub mentioned_user_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a new root message
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        destination: Destination,
        content: String,
    ) -> Self {
        Self {
            id,
            author_id,
            destination,
            content,
            thread: ThreadState::new_root(),
            mentioned_user_ids: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Create a reply to an existing message
    ///
    /// `thread_id` is the parent's thread identity - the parent's own id if
    /// the parent was a plain message (lazy root promotion).
    pub fn new_reply(
        id: Snowflake,
        author_id: Snowflake,
        destination: Destination,
        content: String,
        thread_id: Snowflake,
        parent_id: Snowflake,
    ) -> Self {
        Self {
            id,
            author_id,
            destination,
            content,
            thread: ThreadState::Reply { thread_id, parent_id },
            mentioned_user_ids: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// The thread identity of this message: its own id for roots, the root's
    /// id for replies. Every message has one.
    #[inline]
    pub fn thread_id(&self) -> Snowflake {
        match self.thread {
            ThreadState::Root { .. } => self.id,
            ThreadState::Reply { thread_id, .. } => thread_id,
        }
    }

    /// The immediate parent, if this is a reply
    #[inline]
    pub fn parent_id(&self) -> Option<Snowflake> {
        match self.thread {
            ThreadState::Root { .. } => None,
            ThreadState::Reply { parent_id, .. } => Some(parent_id),
        }
    }

    /// Check if this message is a thread root
    #[inline]
    pub fn is_root(&self) -> bool {
        matches!(self.thread, ThreadState::Root { .. })
    }

    /// Reply count, if this message is a root
    #[inline]
    pub fn reply_count(&self) -> Option<i32> {
        match self.thread {
            ThreadState::Root { reply_count, .. } => Some(reply_count),
            ThreadState::Reply { .. } => None,
        }
    }

    /// Check if this is a direct message
    #[inline]
    pub fn is_direct(&self) -> bool {
        matches!(self.destination, Destination::Direct(_))
    }

    /// Check if the message has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    /// Edit the message content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Some(Utc::now());
    }

    /// Check if message content is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
