//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in community-core.

mod error;
mod membership;
mod points;
mod report;
mod user;

pub use membership::PgMembershipRepository;
pub use points::PgPointLedgerRepository;
pub use report::PgReportRepository;
pub use user::PgUserRepository;
