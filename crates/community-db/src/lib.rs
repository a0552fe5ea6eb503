//! # community-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and SQL migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use community_db::{create_pool, run_migrations, PgMembershipRepository, PoolConfig};
//!
//! let pool = create_pool(&PoolConfig::new(database_url)).await?;
//! run_migrations(&pool).await?;
//! let memberships = PgMembershipRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{
    PgMembershipRepository, PgPointLedgerRepository, PgReportRepository, PgUserRepository,
};
