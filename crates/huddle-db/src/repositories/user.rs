//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::User;
use huddle_core::traits::{RepoResult, UserRepository};
use huddle_core::value_objects::Snowflake;

use crate::models::UserModel;

use super::error::{map_db_error, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, display_name, avatar, status_text, status_emoji, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT id, username, display_name, avatar, status_text, status_emoji, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, usernames))]
    async fn find_workspace_members_by_usernames(
        &self,
        workspace_id: Snowflake,
        usernames: &[&str],
    ) -> RepoResult<Vec<User>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = usernames.iter().map(|s| (*s).to_string()).collect();

        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT u.id, u.username, u.display_name, u.avatar, u.status_text, u.status_emoji,
                   u.created_at, u.updated_at
            FROM users u
            JOIN workspace_members wm ON wm.user_id = u.id
            WHERE wm.workspace_id = $1 AND u.username = ANY($2)
            "#,
        )
        .bind(workspace_id.into_inner())
        .bind(&names)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Snowflake,
        status_text: Option<&str>,
        status_emoji: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET status_text = $2, status_emoji = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(status_text)
        .bind(status_emoji)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
