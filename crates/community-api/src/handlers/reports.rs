//! Report handlers

use axum::{extract::State, Json};
use community_service::dto::{CreateReportRequest, ReportResponse};
use community_service::ReportService;

use crate::extractors::{AuthUser, SnowflakePath, UserIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Report a member
///
/// POST /api/reports
pub async fn create_report(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReportRequest>,
) -> ApiResult<Created<Json<ReportResponse>>> {
    let service = ReportService::new(state.service_context());
    let report = service.report_member(auth.user_id, request).await?;
    Ok(Created(Json(report)))
}

/// Reports filed against a user
///
/// GET /api/users/{user_id}/reports
pub async fn get_user_reports(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
) -> ApiResult<Json<Vec<ReportResponse>>> {
    let user_id = path.user_id()?;

    let service = ReportService::new(state.service_context());
    Ok(Json(service.reports_for_member(user_id).await?))
}
