//! # community-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Membership, MembershipRole, MembershipStatus, PointCounts, PointLedgerEntry, Report,
    ReportStatus, ReportType, UserProfile,
};
pub use error::DomainError;
pub use events::MembershipEvent;
pub use traits::{
    MembershipNotifier, MembershipRepository, PointLedgerRepository, RepoResult,
    ReportRepository, UserRepository,
};
pub use value_objects::{PointType, Snowflake, SnowflakeGenerator, SnowflakeParseError};
