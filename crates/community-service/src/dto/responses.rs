//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use community_core::{MembershipRole, MembershipStatus, ReportStatus, ReportType, Snowflake};
use serde::Serialize;

/// Shown in place of a name when the profile could not be loaded
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

// ============================================================================
// Moderation Queue
// ============================================================================

/// A prior report shown next to a join request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub id: Snowflake,
    pub reporter_id: Snowflake,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

/// A pending request enriched with the requester's trust signals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinRequestView {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub community_id: Snowflake,
    pub user_name: String,
    /// Empty when the profile is missing or has none
    pub email: String,
    /// Empty when the profile is missing or has none
    pub avatar_url: String,
    pub joined_at: DateTime<Utc>,
    pub points_count: i64,
    pub report_count: i64,
    pub reports: Vec<ReportSummary>,
}

/// Which enrichment lookup failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentSource {
    Profiles,
    Points,
    Reports,
}

/// Degraded-result notice attached to a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchWarning {
    /// The queue itself could not be read; `requests` is empty
    TransientFetchError { message: String },
    /// Requests are listed but one enrichment source fell back to defaults
    PartialEnrichment {
        source: EnrichmentSource,
        message: String,
    },
}

impl FetchWarning {
    pub fn transient() -> Self {
        Self::TransientFetchError {
            message: "Join requests are temporarily unavailable, please retry".to_string(),
        }
    }

    pub fn partial(source: EnrichmentSource) -> Self {
        let message = match source {
            EnrichmentSource::Profiles => "Some user profiles could not be loaded",
            EnrichmentSource::Points => "Activity points could not be loaded",
            EnrichmentSource::Reports => "Prior reports could not be loaded",
        };
        Self::PartialEnrichment {
            source,
            message: message.to_string(),
        }
    }
}

/// Result of listing a community's pending requests
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinRequestList {
    pub requests: Vec<JoinRequestView>,
    pub warnings: Vec<FetchWarning>,
}

impl JoinRequestList {
    /// Listing for a queue that could not be read
    pub fn unavailable() -> Self {
        Self {
            requests: Vec::new(),
            warnings: vec![FetchWarning::transient()],
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkModerationResponse {
    pub affected: u64,
}

// ============================================================================
// Memberships
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipResponse {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
}

/// Approved member with display data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberResponse {
    pub user_id: Snowflake,
    pub community_id: Snowflake,
    pub role: MembershipRole,
    pub user_name: String,
    pub avatar_url: Option<String>,
    pub joined_at: DateTime<Utc>,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResponse {
    pub id: Snowflake,
    pub report_type: ReportType,
    pub target_id: Snowflake,
    pub reporter_id: Snowflake,
    pub reason: String,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Status of each backing dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub notifier: String,
}

fn health_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, notifier_healthy: bool) -> Self {
        let all_healthy = database_healthy && notifier_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy),
                notifier: health_label(notifier_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
