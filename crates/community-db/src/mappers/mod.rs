//! Entity to model mappers
//!
//! - `From`/`TryFrom<Model> for Entity`: database rows to domain objects
//! - `*Insert` structs: entity data prepared for binding

mod membership;
mod points;
mod report;
mod user;

pub use membership::{memberships_from_models, MembershipInsert};
pub use report::{reports_from_models, ReportInsert};
