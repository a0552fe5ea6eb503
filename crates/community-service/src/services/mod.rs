//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and are created per request.

pub mod context;
pub mod error;
pub mod membership;
pub mod moderation;
pub mod report;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use membership::MembershipService;
pub use moderation::ModerationService;
pub use report::ReportService;
