//! Path parameter extractors
//!
//! Ids arrive as strings and are parsed into Snowflakes by the handler, so a
//! malformed id is a 400 with our error body rather than axum's plain text.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use community_core::Snowflake;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::response::ApiError;

/// Path extractor whose rejection is an [`ApiError`]
#[derive(Debug, Clone)]
pub struct SnowflakePath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for SnowflakePath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(SnowflakePath(inner))
    }
}

fn parse_id(raw: &str, field: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {field} format")))
}

/// Path parameters with community_id
#[derive(Debug, Deserialize)]
pub struct CommunityIdPath {
    pub community_id: String,
}

impl CommunityIdPath {
    pub fn community_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.community_id, "community_id")
    }
}

/// Path parameters with a join request id
#[derive(Debug, Deserialize)]
pub struct RequestIdPath {
    pub request_id: String,
}

impl RequestIdPath {
    pub fn request_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.request_id, "request_id")
    }
}

/// Path parameters with user_id
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub user_id: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.user_id, "user_id")
    }
}
