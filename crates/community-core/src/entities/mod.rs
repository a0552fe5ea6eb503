//! Domain entities - core business objects

mod membership;
mod points;
mod report;
mod user;

pub use membership::{Membership, MembershipRole, MembershipStatus};
pub use points::{PointCounts, PointLedgerEntry};
pub use report::{Report, ReportStatus, ReportType};
pub use user::UserProfile;
