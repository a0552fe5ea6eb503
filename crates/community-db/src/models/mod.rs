//! Database models - SQLx-compatible structs for PostgreSQL tables

mod membership;
mod points;
mod report;
mod user;

pub use membership::MembershipModel;
pub use points::PointCountsModel;
pub use report::ReportModel;
pub use user::UserProfileModel;
