//! `?after=&limit=` cursor parameters for member listings.
//!
//! The limit is passed through untouched; the membership service owns the
//! default and the clamp.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use community_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Default, Deserialize)]
struct RawPageQuery {
    after: Option<String>,
    limit: Option<i64>,
}

/// Parsed page cursor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Only users with a larger id are returned
    pub after: Option<Snowflake>,
    pub limit: Option<i64>,
}

impl TryFrom<RawPageQuery> for PageQuery {
    type Error = ApiError;

    fn try_from(raw: RawPageQuery) -> Result<Self, Self::Error> {
        let after = match raw.after.as_deref() {
            None | Some("") => None,
            Some(cursor) => Some(
                cursor
                    .parse::<Snowflake>()
                    .map_err(|_| ApiError::invalid_query(format!("'{cursor}' is not a valid cursor")))?,
            ),
        };
        Ok(Self {
            after,
            limit: raw.limit,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPageQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;
        raw.try_into()
    }
}
