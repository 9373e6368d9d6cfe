//! Value objects - immutable types that represent domain concepts

mod prefix;
mod snowflake;

pub use prefix::{Prefix, DEFAULT_PREFIX, MAX_PREFIX_LEN};
pub use snowflake::{Snowflake, SnowflakeParseError};
