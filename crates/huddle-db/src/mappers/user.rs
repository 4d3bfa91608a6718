//! User entity <-> model mapper

use huddle_core::entities::User;
use huddle_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            display_name: model.display_name,
            avatar: model.avatar,
            status_text: model.status_text,
            status_emoji: model.status_emoji,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
