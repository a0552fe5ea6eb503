//! Membership events
//!
//! Handed to a [`MembershipNotifier`](crate::traits::MembershipNotifier) after a
//! mutation commits. Consumers use them to notify the affected user and to
//! refresh moderator dashboards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Membership, Report};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipEvent {
    JoinRequested(JoinRequestEvent),
    JoinRequestApproved(JoinRequestEvent),
    JoinRequestRejected(JoinRequestEvent),
    JoinRequestsBulkApproved(BulkModeratedEvent),
    JoinRequestsBulkRejected(BulkModeratedEvent),
    MemberReported(MemberReportedEvent),
}

impl MembershipEvent {
    /// Wire name, matches the serde tag
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::JoinRequested(_) => "JOIN_REQUESTED",
            Self::JoinRequestApproved(_) => "JOIN_REQUEST_APPROVED",
            Self::JoinRequestRejected(_) => "JOIN_REQUEST_REJECTED",
            Self::JoinRequestsBulkApproved(_) => "JOIN_REQUESTS_BULK_APPROVED",
            Self::JoinRequestsBulkRejected(_) => "JOIN_REQUESTS_BULK_REJECTED",
            Self::MemberReported(_) => "MEMBER_REPORTED",
        }
    }

    /// Community the event belongs to, if any
    pub fn community_id(&self) -> Option<Snowflake> {
        match self {
            Self::JoinRequested(e) | Self::JoinRequestApproved(e) | Self::JoinRequestRejected(e) => {
                Some(e.community_id)
            }
            Self::JoinRequestsBulkApproved(e) | Self::JoinRequestsBulkRejected(e) => {
                Some(e.community_id)
            }
            Self::MemberReported(_) => None,
        }
    }

    /// Users whose own membership or standing changed
    pub fn affected_users(&self) -> Vec<Snowflake> {
        match self {
            Self::JoinRequested(e) | Self::JoinRequestApproved(e) | Self::JoinRequestRejected(e) => {
                vec![e.user_id]
            }
            Self::JoinRequestsBulkApproved(e) | Self::JoinRequestsBulkRejected(e) => {
                e.user_ids.clone()
            }
            Self::MemberReported(e) => vec![e.target_user_id],
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::JoinRequested(e) | Self::JoinRequestApproved(e) | Self::JoinRequestRejected(e) => {
                e.timestamp
            }
            Self::JoinRequestsBulkApproved(e) | Self::JoinRequestsBulkRejected(e) => e.timestamp,
            Self::MemberReported(e) => e.timestamp,
        }
    }

    pub fn join_requested(membership: &Membership) -> Self {
        Self::JoinRequested(JoinRequestEvent::from(membership))
    }

    pub fn approved(membership: &Membership) -> Self {
        Self::JoinRequestApproved(JoinRequestEvent::from(membership))
    }

    pub fn rejected(membership: &Membership) -> Self {
        Self::JoinRequestRejected(JoinRequestEvent::from(membership))
    }

    pub fn bulk_approved(community_id: Snowflake, memberships: &[Membership]) -> Self {
        Self::JoinRequestsBulkApproved(BulkModeratedEvent::new(community_id, memberships))
    }

    pub fn bulk_rejected(community_id: Snowflake, memberships: &[Membership]) -> Self {
        Self::JoinRequestsBulkRejected(BulkModeratedEvent::new(community_id, memberships))
    }

    pub fn member_reported(report: &Report) -> Self {
        Self::MemberReported(MemberReportedEvent {
            report_id: report.id,
            target_user_id: report.target_id,
            reporter_id: report.reporter_id,
            timestamp: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequestEvent {
    pub request_id: Snowflake,
    pub community_id: Snowflake,
    pub user_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

impl From<&Membership> for JoinRequestEvent {
    fn from(membership: &Membership) -> Self {
        Self {
            request_id: membership.id,
            community_id: membership.community_id,
            user_id: membership.user_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkModeratedEvent {
    pub community_id: Snowflake,
    pub request_ids: Vec<Snowflake>,
    pub user_ids: Vec<Snowflake>,
    pub timestamp: DateTime<Utc>,
}

impl BulkModeratedEvent {
    pub fn new(community_id: Snowflake, memberships: &[Membership]) -> Self {
        Self {
            community_id,
            request_ids: memberships.iter().map(|m| m.id).collect(),
            user_ids: memberships.iter().map(|m| m.user_id).collect(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberReportedEvent {
    pub report_id: Snowflake,
    pub target_user_id: Snowflake,
    pub reporter_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}
