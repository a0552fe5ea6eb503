//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::entities::MembershipStatus;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    /// No pending request with this id under this community
    #[error("Join request not found: {0}")]
    JoinRequestNotFound(Snowflake),

    #[error("Membership not found")]
    MembershipNotFound,

    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cannot report yourself")]
    CannotReportSelf,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only community admins can moderate join requests")]
    NotModerator,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("A join request for this community is already pending")]
    JoinRequestAlreadyPending,

    #[error("Already a member of this community")]
    AlreadyMember,

    #[error("Cannot move membership from {from} to {to}")]
    InvalidMembershipState {
        from: MembershipStatus,
        to: MembershipStatus,
    },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Notifier error: {0}")]
    NotifierError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::JoinRequestNotFound(_) => "UNKNOWN_JOIN_REQUEST",
            Self::MembershipNotFound => "UNKNOWN_MEMBERSHIP",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::CannotReportSelf => "CANNOT_REPORT_SELF",

            Self::NotModerator => "NOT_MODERATOR",

            Self::JoinRequestAlreadyPending => "JOIN_REQUEST_ALREADY_PENDING",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::InvalidMembershipState { .. } => "INVALID_MEMBERSHIP_STATE",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::NotifierError(_) => "NOTIFIER_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::JoinRequestNotFound(_) | Self::MembershipNotFound | Self::UserNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::CannotReportSelf)
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotModerator)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::JoinRequestAlreadyPending | Self::AlreadyMember | Self::InvalidMembershipState { .. }
        )
    }

    /// Store or notifier failure, as opposed to a rule violation
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::NotifierError(_) | Self::InternalError(_)
        )
    }
}
