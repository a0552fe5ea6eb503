//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use community_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with dependency health
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let (database, notifier) = tokio::join!(
        ctx.membership_repo().health_check(),
        ctx.notifier().health_check(),
    );

    if let Err(e) = &database {
        tracing::warn!(error = %e, "Database health check failed");
    }
    if let Err(e) = &notifier {
        tracing::warn!(error = %e, "Notifier health check failed");
    }

    let response = ReadinessResponse::ready(database.is_ok(), notifier.is_ok());
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
