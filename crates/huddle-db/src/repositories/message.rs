//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::{Message, Notification};
use huddle_core::traits::{HistoryQuery, MessageRepository, RepoResult};
use huddle_core::value_objects::Snowflake;

use crate::mappers::{MessageInsert, NotificationInsert};
use crate::models::MessageModel;

use super::error::{map_db_error, message_not_found};

const MESSAGE_COLUMNS: &str = "id, author_id, channel_id, recipient_id, content, thread_id, \
     parent_id, reply_count, last_reply_at, mentioned_user_ids, created_at, updated_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn collect(models: Vec<MessageModel>) -> RepoResult<Vec<Message>> {
        models.into_iter().map(Message::try_from).collect()
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Message::try_from).transpose()
    }

    #[instrument(skip(self, message, notifications), fields(message_id = %message.id))]
    async fn create(&self, message: &Message, notifications: &[Notification]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let insert = MessageInsert::new(message);
        sqlx::query(
            r#"
            INSERT INTO messages
                (id, author_id, channel_id, recipient_id, content, thread_id, parent_id,
                 mentioned_user_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.channel_id)
        .bind(insert.recipient_id)
        .bind(insert.content)
        .bind(insert.thread_id)
        .bind(insert.parent_id)
        .bind(&insert.mentioned_user_ids)
        .bind(message.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // A reply bumps the thread root's counters in the same transaction
        if let Some(thread_id) = insert.thread_id {
            let updated = sqlx::query(
                r#"
                UPDATE messages
                SET reply_count = reply_count + 1, last_reply_at = $2
                WHERE id = $1
                "#,
            )
            .bind(thread_id)
            .bind(message.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            if updated.rows_affected() == 0 {
                return Err(message_not_found(Snowflake::new(thread_id)));
            }
        }

        for notification in notifications {
            let insert = NotificationInsert::new(notification);
            sqlx::query(
                r#"
                INSERT INTO notifications
                    (id, recipient_id, kind, sender_id, message_id, channel_id, is_read, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
                "#,
            )
            .bind(insert.id)
            .bind(insert.recipient_id)
            .bind(insert.kind)
            .bind(insert.sender_id)
            .bind(insert.message_id)
            .bind(insert.channel_id)
            .bind(notification.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn update(&self, message: &Message) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(message.id.into_inner())
        .bind(&message.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(message.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM reactions WHERE message_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        // Thread counters on the root are intentionally left as-is
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_channel(
        &self,
        channel_id: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match query.before {
            Some(before) => {
                // Fetch messages before cursor (scrolling up)
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS}
                    FROM messages
                    WHERE channel_id = $1 AND id < $2
                    ORDER BY id DESC
                    LIMIT $3
                    "#
                ))
                .bind(channel_id.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                // Fetch latest messages (no cursor)
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS}
                    FROM messages
                    WHERE channel_id = $1
                    ORDER BY id DESC
                    LIMIT $2
                    "#
                ))
                .bind(channel_id.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self))]
    async fn find_direct(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        query: HistoryQuery,
    ) -> RepoResult<Vec<Message>> {
        let limit = query.limit.clamp(1, 100);

        let results = match query.before {
            Some(before) => {
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS}
                    FROM messages
                    WHERE ((author_id = $1 AND recipient_id = $2)
                        OR (author_id = $2 AND recipient_id = $1))
                      AND id < $3
                    ORDER BY id DESC
                    LIMIT $4
                    "#
                ))
                .bind(user_a.into_inner())
                .bind(user_b.into_inner())
                .bind(before.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, MessageModel>(&format!(
                    r#"
                    SELECT {MESSAGE_COLUMNS}
                    FROM messages
                    WHERE (author_id = $1 AND recipient_id = $2)
                       OR (author_id = $2 AND recipient_id = $1)
                    ORDER BY id DESC
                    LIMIT $3
                    "#
                ))
                .bind(user_a.into_inner())
                .bind(user_b.into_inner())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self))]
    async fn find_thread(&self, thread_id: Snowflake) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE id = $1 OR thread_id = $1
            ORDER BY id ASC
            "#
        ))
        .bind(thread_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }
}
