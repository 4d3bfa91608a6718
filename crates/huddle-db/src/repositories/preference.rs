//! PostgreSQL implementation of PreferenceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::NotificationPreference;
use huddle_core::traits::{PreferenceRepository, RepoResult};
use huddle_core::value_objects::Snowflake;

use crate::models::NotificationPreferenceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PreferenceRepository
///
/// The (user_id, workspace_id, channel_id) key is unique with NULLs not
/// distinct, so the workspace-level DM default is a single row too.
#[derive(Clone)]
pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    /// Create a new PgPreferenceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    #[instrument(skip(self, preference), fields(user_id = %preference.user_id))]
    async fn upsert(&self, preference: &NotificationPreference) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notification_preferences (user_id, workspace_id, channel_id, setting)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, workspace_id, channel_id)
            DO UPDATE SET setting = EXCLUDED.setting
            "#,
        )
        .bind(preference.user_id.into_inner())
        .bind(preference.workspace_id.into_inner())
        .bind(preference.channel_id.map(Snowflake::into_inner))
        .bind(preference.setting.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> RepoResult<Option<NotificationPreference>> {
        let result = sqlx::query_as::<_, NotificationPreferenceModel>(
            r#"
            SELECT user_id, workspace_id, channel_id, setting
            FROM notification_preferences
            WHERE user_id = $1 AND workspace_id = $2 AND channel_id IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(workspace_id.into_inner())
        .bind(channel_id.map(Snowflake::into_inner))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(NotificationPreference::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        workspace_id: Snowflake,
    ) -> RepoResult<Vec<NotificationPreference>> {
        let results = sqlx::query_as::<_, NotificationPreferenceModel>(
            r#"
            SELECT user_id, workspace_id, channel_id, setting
            FROM notification_preferences
            WHERE user_id = $1 AND workspace_id = $2
            ORDER BY channel_id NULLS FIRST
            "#,
        )
        .bind(user_id.into_inner())
        .bind(workspace_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results
            .into_iter()
            .map(NotificationPreference::try_from)
            .collect()
    }
}
