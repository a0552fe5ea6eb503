//! Report service
//!
//! Filing reports against members. Every report also lands on the target's
//! point ledger as a `report_received` entry, which is what moderators see
//! as the report counter.

use community_core::entities::{PointLedgerEntry, Report};
use community_core::{DomainError, MembershipEvent, ReportType, Snowflake};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateReportRequest, ReportResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::moderation::require_id;

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Report a member
    #[instrument(skip(self, request), fields(target_user_id = %request.target_user_id))]
    pub async fn report_member(
        &self,
        reporter_id: Snowflake,
        request: CreateReportRequest,
    ) -> ServiceResult<ReportResponse> {
        require_id("target_user_id", request.target_user_id)?;

        let reason = request.reason.trim().to_string();
        let details = request
            .details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let request = CreateReportRequest {
            reason,
            details,
            ..request
        };
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if request.target_user_id == reporter_id {
            return Err(DomainError::CannotReportSelf.into());
        }

        let report = Report::against_member(
            self.ctx.generate_id(),
            request.target_user_id,
            reporter_id,
            request.reason,
            request.details,
        );

        let ledger_entry = PointLedgerEntry::report_received(report.target_id);
        self.ctx
            .report_repo()
            .create(&report, Some(&ledger_entry))
            .await?;

        info!(
            report_id = %report.id,
            target_user_id = %report.target_id,
            reporter_id = %reporter_id,
            "Member reported"
        );

        self.ctx
            .publish(MembershipEvent::member_reported(&report))
            .await;

        Ok(ReportResponse::from(report))
    }

    /// Reports filed against a user, newest first
    #[instrument(skip(self))]
    pub async fn reports_for_member(
        &self,
        target_user_id: Snowflake,
    ) -> ServiceResult<Vec<ReportResponse>> {
        require_id("user_id", target_user_id)?;

        let reports = self
            .ctx
            .report_repo()
            .find_by_target(ReportType::Member, target_user_id)
            .await?;

        Ok(reports.into_iter().map(ReportResponse::from).collect())
    }
}
