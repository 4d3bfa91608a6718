//! Reaction summary model -> entity mapper

use huddle_core::entities::ReactionSummary;
use huddle_core::value_objects::Snowflake;

use crate::models::ReactionSummaryModel;

impl From<ReactionSummaryModel> for ReactionSummary {
    fn from(model: ReactionSummaryModel) -> Self {
        ReactionSummary {
            emoji: model.emoji,
            count: model.count,
            user_ids: model.user_ids.into_iter().map(Snowflake::new).collect(),
        }
    }
}
