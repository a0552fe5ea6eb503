//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and path ids.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::AuthUser;
pub use pagination::PageQuery;
pub use path::{CommunityIdPath, RequestIdPath, SnowflakePath, UserIdPath};
pub use validated::ValidatedJson;
