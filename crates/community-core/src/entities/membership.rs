//! Membership entity - one user's relationship to one community

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Role a member holds inside a community
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    #[default]
    Member,
    Admin,
}

impl MembershipRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Admin => "admin",
        }
    }
}

/// Moderation status of a membership
///
/// `Rejected` is a valid stored value but this workflow deletes rejected
/// requests instead of writing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl MembershipStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Statuses covered by the one-live-membership-per-user rule
    #[inline]
    pub fn is_live(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl fmt::Display for MembershipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub id: Snowflake,
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Create a pending join request
    pub fn request(id: Snowflake, community_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            id,
            community_id,
            user_id,
            role: MembershipRole::Member,
            status: MembershipStatus::Pending,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == MembershipStatus::Pending
    }

    #[inline]
    pub fn is_approved(&self) -> bool {
        self.status == MembershipStatus::Approved
    }

    /// Approved admins are the community's moderators
    #[inline]
    pub fn is_moderator(&self) -> bool {
        self.is_approved() && self.role == MembershipRole::Admin
    }

    /// `pending -> approved`, the only forward transition
    pub fn approve(&mut self) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::InvalidMembershipState {
                from: self.status,
                to: MembershipStatus::Approved,
            });
        }
        self.status = MembershipStatus::Approved;
        Ok(())
    }
}
