//! Entity to DTO mappers

use community_core::entities::{Membership, PointCounts, Report, UserProfile};

use super::responses::{
    JoinRequestView, MemberResponse, MembershipResponse, ReportResponse, ReportSummary,
    UNKNOWN_USER_NAME,
};

impl From<&Membership> for MembershipResponse {
    fn from(membership: &Membership) -> Self {
        Self {
            id: membership.id,
            community_id: membership.community_id,
            user_id: membership.user_id,
            role: membership.role,
            status: membership.status,
            joined_at: membership.joined_at,
        }
    }
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self::from(&membership)
    }
}

impl From<&Report> for ReportSummary {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            reporter_id: report.reporter_id,
            reason: report.reason.clone(),
            details: report.details.clone(),
            status: report.status,
            created_at: report.created_at,
        }
    }
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            report_type: report.report_type,
            target_id: report.target_id,
            reporter_id: report.reporter_id,
            reason: report.reason,
            details: report.details,
            status: report.status,
            created_at: report.created_at,
        }
    }
}

impl JoinRequestView {
    /// Assemble a view; absent enrichment falls back to placeholders and zeros
    pub fn assemble(
        membership: &Membership,
        profile: Option<&UserProfile>,
        counts: Option<&PointCounts>,
        reports: Vec<ReportSummary>,
    ) -> Self {
        Self {
            id: membership.id,
            user_id: membership.user_id,
            community_id: membership.community_id,
            user_name: profile.map_or_else(|| UNKNOWN_USER_NAME.to_string(), |p| p.display_name().to_string()),
            email: profile.and_then(|p| p.email.clone()).unwrap_or_default(),
            avatar_url: profile.and_then(|p| p.avatar_url.clone()).unwrap_or_default(),
            joined_at: membership.joined_at,
            points_count: counts.map_or(0, |c| c.points_count),
            report_count: counts.map_or(0, |c| c.report_count),
            reports,
        }
    }
}

impl MemberResponse {
    pub fn assemble(membership: &Membership, profile: Option<&UserProfile>) -> Self {
        Self {
            user_id: membership.user_id,
            community_id: membership.community_id,
            role: membership.role,
            user_name: profile.map_or_else(|| UNKNOWN_USER_NAME.to_string(), |p| p.display_name().to_string()),
            avatar_url: profile.and_then(|p| p.avatar_url.clone()),
            joined_at: membership.joined_at,
        }
    }
}
