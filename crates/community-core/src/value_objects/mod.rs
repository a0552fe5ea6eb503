//! Value objects - immutable types that represent domain concepts

mod point_type;
mod snowflake;

pub use point_type::PointType;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
