//! Route definitions
//!
//! All API routes live under /api; health probes are mounted separately.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, join_requests, memberships, reports};
use crate::state::AppState;

/// Create the main API router (health routes excluded so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(moderation_routes())
        .merge(membership_routes())
        .merge(report_routes())
}

/// Moderation queue routes
fn moderation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/communities/:community_id/join-requests",
            get(join_requests::list_join_requests),
        )
        .route(
            "/communities/:community_id/join-requests/approve-all",
            post(join_requests::approve_all_join_requests),
        )
        .route(
            "/communities/:community_id/join-requests/reject-all",
            post(join_requests::reject_all_join_requests),
        )
        .route(
            "/communities/members/:request_id/approve",
            post(join_requests::approve_join_request),
        )
        .route(
            "/communities/members/:request_id/reject",
            post(join_requests::reject_join_request),
        )
}

/// Membership routes
fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/communities/:community_id/join", post(memberships::request_to_join))
        .route("/communities/:community_id/members", get(memberships::list_members))
        .route(
            "/communities/:community_id/members/@me",
            get(memberships::get_my_membership),
        )
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", post(reports::create_report))
        .route("/users/:user_id/reports", get(reports::get_user_reports))
}
