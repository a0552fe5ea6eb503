//! Request DTOs for API endpoints
//!
//! Ids accept either a JSON string or a number.

use community_core::Snowflake;
use serde::Deserialize;
use validator::Validate;

/// Body of the per-item approve/reject endpoints
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModerateRequest {
    pub community_id: Snowflake,
}

/// Report a member to the moderators
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub target_user_id: Snowflake,

    #[validate(length(min = 1, max = 64, message = "Reason must be 1-64 characters"))]
    pub reason: String,

    #[validate(length(max = 1000, message = "Details must be at most 1000 characters"))]
    pub details: Option<String>,
}
