//! Value objects - immutable types that represent domain concepts

mod mention;
mod snowflake;

pub use mention::mention_candidates;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
