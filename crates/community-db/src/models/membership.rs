//! Membership database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for community_members table
#[derive(Debug, Clone, FromRow)]
pub struct MembershipModel {
    pub id: i64,
    pub community_id: i64,
    pub user_id: i64,
    pub role: String,
    pub status: String,
    pub joined_at: DateTime<Utc>,
}
