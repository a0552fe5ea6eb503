//! Report entity <-> model mapper

use community_core::entities::{Report, ReportStatus, ReportType};
use community_core::error::DomainError;
use community_core::value_objects::Snowflake;

use crate::models::ReportModel;

fn parse_report_type(raw: &str) -> Result<ReportType, DomainError> {
    match raw {
        "member" => Ok(ReportType::Member),
        "event" => Ok(ReportType::Event),
        "community" => Ok(ReportType::Community),
        "comment" => Ok(ReportType::Comment),
        other => Err(DomainError::InternalError(format!("unknown report type '{other}'"))),
    }
}

fn parse_report_status(raw: &str) -> Result<ReportStatus, DomainError> {
    match raw {
        "pending" => Ok(ReportStatus::Pending),
        "reviewing" => Ok(ReportStatus::Reviewing),
        "resolved" => Ok(ReportStatus::Resolved),
        "dismissed" => Ok(ReportStatus::Dismissed),
        other => Err(DomainError::InternalError(format!("unknown report status '{other}'"))),
    }
}

impl TryFrom<ReportModel> for Report {
    type Error = DomainError;

    fn try_from(model: ReportModel) -> Result<Self, Self::Error> {
        Ok(Report {
            id: Snowflake::new(model.id),
            report_type: parse_report_type(&model.report_type)?,
            target_id: Snowflake::new(model.target_id),
            reporter_id: Snowflake::new(model.reporter_id),
            reason: model.reason,
            details: model.details,
            status: parse_report_status(&model.status)?,
            created_at: model.created_at,
        })
    }
}

pub fn reports_from_models(models: Vec<ReportModel>) -> Result<Vec<Report>, DomainError> {
    models.into_iter().map(Report::try_from).collect()
}

/// Report entity reference to values for database insertion
pub struct ReportInsert<'a> {
    pub id: i64,
    pub report_type: &'static str,
    pub target_id: i64,
    pub reporter_id: i64,
    pub reason: &'a str,
    pub details: Option<&'a str>,
    pub status: &'static str,
}

impl<'a> ReportInsert<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self {
            id: report.id.into_inner(),
            report_type: report.report_type.as_str(),
            target_id: report.target_id.into_inner(),
            reporter_id: report.reporter_id.into_inner(),
            reason: &report.reason,
            details: report.details.as_deref(),
            status: report.status.as_str(),
        }
    }
}
