//! History pagination parameters

use huddle_core::traits::HistoryQuery;
use huddle_core::Snowflake;
use serde::Deserialize;

/// Query parameters for history endpoints
///
/// `before` is an exclusive snowflake cursor; results come back newest
/// first.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub before: Option<Snowflake>,
}

impl From<HistoryParams> for HistoryQuery {
    fn from(params: HistoryParams) -> Self {
        let default = HistoryQuery::default();
        HistoryQuery {
            limit: params.limit.unwrap_or(default.limit),
            before: params.before,
        }
    }
}
