//! PostgreSQL implementation of WorkspaceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use huddle_core::entities::Workspace;
use huddle_core::traits::{RepoResult, WorkspaceRepository};
use huddle_core::value_objects::Snowflake;

use crate::models::WorkspaceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of WorkspaceRepository
#[derive(Clone)]
pub struct PgWorkspaceRepository {
    pool: PgPool,
}

impl PgWorkspaceRepository {
    /// Create a new PgWorkspaceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Workspace>> {
        let result = sqlx::query_as::<_, WorkspaceModel>(
            r#"
            SELECT id, name, owner_id, created_at
            FROM workspaces
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Workspace::from))
    }

    #[instrument(skip(self))]
    async fn find_ids_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>> {
        let results = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT workspace_id
            FROM workspace_members
            WHERE user_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Snowflake::new).collect())
    }
}
