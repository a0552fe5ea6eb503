//! Bearer-token authentication
//!
//! Tokens are issued elsewhere; this side only checks the signature and
//! expiry and reads the subject as the acting user.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use community_common::AppError;
use community_core::Snowflake;

use crate::response::ApiError;
use crate::state::AppState;

/// The caller behind a valid access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Snowflake,
}

fn rejected(e: AppError) -> ApiError {
    tracing::warn!(error = %e, "Access token rejected");
    ApiError::App(e)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let user_id = AppState::from_ref(state)
            .jwt_service()
            .validate_access_token(bearer.token())
            .and_then(|claims| claims.user_id())
            .map_err(rejected)?;

        Ok(Self { user_id })
    }
}
