//! Membership handlers
//!
//! Endpoints for asking to join a community and browsing its members.

use axum::{extract::State, Json};
use community_service::dto::{MemberResponse, MembershipResponse};
use community_service::MembershipService;

use crate::extractors::{AuthUser, CommunityIdPath, PageQuery, SnowflakePath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Ask to join a community
///
/// POST /api/communities/{community_id}/join
pub async fn request_to_join(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
) -> ApiResult<Created<Json<MembershipResponse>>> {
    let community_id = path.community_id()?;

    let service = MembershipService::new(state.service_context());
    let membership = service.request_to_join(community_id, auth.user_id).await?;
    Ok(Created(Json(membership)))
}

/// The caller's own membership (pending or approved)
///
/// GET /api/communities/{community_id}/members/@me
pub async fn get_my_membership(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
) -> ApiResult<Json<MembershipResponse>> {
    let community_id = path.community_id()?;

    let service = MembershipService::new(state.service_context());
    Ok(Json(service.get_membership(community_id, auth.user_id).await?))
}

/// Approved members of a community
///
/// GET /api/communities/{community_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    SnowflakePath(path): SnowflakePath<CommunityIdPath>,
    page: PageQuery,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let community_id = path.community_id()?;

    let service = MembershipService::new(state.service_context());
    let members = service
        .list_members(community_id, page.limit, page.after)
        .await?;
    Ok(Json(members))
}
