//! Channel entity <-> model mapper

use huddle_core::entities::Channel;
use huddle_core::value_objects::Snowflake;

use crate::models::ChannelModel;

impl From<ChannelModel> for Channel {
    fn from(model: ChannelModel) -> Self {
        Channel {
            id: Snowflake::new(model.id),
            workspace_id: Snowflake::new(model.workspace_id),
            name: model.name,
            is_private: model.is_private,
            is_archived: model.is_archived,
            created_at: model.created_at,
        }
    }
}
