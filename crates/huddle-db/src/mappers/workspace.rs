//! Workspace entity <-> model mapper

use huddle_core::entities::Workspace;
use huddle_core::value_objects::Snowflake;

use crate::models::WorkspaceModel;

impl From<WorkspaceModel> for Workspace {
    fn from(model: WorkspaceModel) -> Self {
        Workspace {
            id: Snowflake::new(model.id),
            name: model.name,
            owner_id: Snowflake::new(model.owner_id),
            created_at: model.created_at,
        }
    }
}
