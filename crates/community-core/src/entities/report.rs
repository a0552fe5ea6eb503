//! Report entity - a complaint filed against a member, event, or community

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What kind of entity a report targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    /// `target_id` is a user id
    Member,
    Event,
    Community,
    Comment,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Event => "event",
            Self::Community => "community",
            Self::Comment => "comment",
        }
    }
}

/// Review status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Reviewing,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewing => "reviewing",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }

    #[inline]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Reviewing)
    }
}

/// Report entity
///
/// Reports are context for moderators only; nothing transitions a membership
/// automatically because of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Snowflake,
    pub report_type: ReportType,
    pub target_id: Snowflake,
    pub reporter_id: Snowflake,
    pub reason: String,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// File a new report against a member
    pub fn against_member(
        id: Snowflake,
        target_user_id: Snowflake,
        reporter_id: Snowflake,
        reason: String,
        details: Option<String>,
    ) -> Self {
        Self {
            id,
            report_type: ReportType::Member,
            target_id: target_user_id,
            reporter_id,
            reason,
            details,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
