//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{CreateReportRequest, ModerateRequest};
pub use responses::{
    BulkModerationResponse, EnrichmentSource, FetchWarning, HealthChecks, HealthResponse,
    JoinRequestList, JoinRequestView, MemberResponse, MembershipResponse, ReadinessResponse,
    ReportResponse, ReportSummary, UNKNOWN_USER_NAME,
};
