//! Join request moderation handlers
//!
//! Every endpoint here requires the caller to be an approved admin of the
//! community being moderated.

use axum::{extract::State, Json};
use community_service::dto::{BulkModerationResponse, JoinRequestList, MembershipResponse, ModerateRequest};
use community_service::ModerationService;

use crate::extractors::{AuthUser, CommunityIdPath, RequestIdPath, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List pending join requests with requester trust signals
///
/// GET /api/communities/{community_id}/join-requests
pub async fn list_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
) -> ApiResult<Json<JoinRequestList>> {
    let community_id = path.community_id()?;

    let service = ModerationService::new(state.service_context());
    service.require_moderator(community_id, auth.user_id).await?;

    let list = service.list_pending_requests(community_id).await?;
    Ok(Json(list))
}

/// Approve one join request
///
/// POST /api/communities/members/{request_id}/approve
pub async fn approve_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<RequestIdPath>,
    ValidatedJson(request): ValidatedJson<ModerateRequest>,
) -> ApiResult<Json<MembershipResponse>> {
    let request_id = path.request_id()?;

    let service = ModerationService::new(state.service_context());
    service
        .require_moderator(request.community_id, auth.user_id)
        .await?;

    let membership = service.approve(request_id, request.community_id).await?;
    Ok(Json(membership))
}

/// Reject (delete) one join request
///
/// POST /api/communities/members/{request_id}/reject
pub async fn reject_join_request(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<RequestIdPath>,
    ValidatedJson(request): ValidatedJson<ModerateRequest>,
) -> ApiResult<NoContent> {
    let request_id = path.request_id()?;

    let service = ModerationService::new(state.service_context());
    service
        .require_moderator(request.community_id, auth.user_id)
        .await?;

    service.reject(request_id, request.community_id).await?;
    Ok(NoContent)
}

/// Approve every pending request
///
/// POST /api/communities/{community_id}/join-requests/approve-all
pub async fn approve_all_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
) -> ApiResult<Json<BulkModerationResponse>> {
    let community_id = path.community_id()?;

    let service = ModerationService::new(state.service_context());
    service.require_moderator(community_id, auth.user_id).await?;

    Ok(Json(service.approve_all(community_id).await?))
}

/// Reject every pending request
///
/// POST /api/communities/{community_id}/join-requests/reject-all
pub async fn reject_all_join_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
) -> ApiResult<Json<BulkModerationResponse>> {
    let community_id = path.community_id()?;

    let service = ModerationService::new(state.service_context());
    service.require_moderator(community_id, auth.user_id).await?;

    Ok(Json(service.reject_all(community_id).await?))
}
