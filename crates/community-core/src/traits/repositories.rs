//! Repository traits (ports) - define the interface for data access
//!
//! The service layer depends on these; `community-db` provides the
//! PostgreSQL implementations and the integration tests provide in-memory ones.

use async_trait::async_trait;

use crate::entities::{
    Membership, PointCounts, PointLedgerEntry, Report, ReportType, UserProfile,
};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Membership Repository
// ============================================================================

#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a membership by id, scoped to its community
    async fn find(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<Option<Membership>>;

    /// Pending requests of a community, newest first
    async fn find_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>>;

    /// The user's live (pending or approved) membership, if any
    async fn find_by_user(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Membership>>;

    /// Approved members ordered by user id, starting after the `after` user
    async fn find_approved(
        &self,
        community_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Membership>>;

    /// User holds an approved admin membership
    async fn is_admin(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool>;

    /// Insert a membership; a second live row for the same user is a conflict
    async fn create(&self, membership: &Membership) -> RepoResult<()>;

    /// `pending -> approved` if the row is still pending in this community.
    /// Returns false when nothing matched.
    async fn approve_pending(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<bool>;

    /// Delete the row if it is still pending in this community.
    /// Returns false when nothing matched.
    async fn delete_pending(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<bool>;

    /// Approve every pending request of the community in one step
    async fn approve_all_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>>;

    /// Delete every pending request of the community in one step
    async fn delete_all_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>>;

    async fn health_check(&self) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user profile by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<UserProfile>>;

    /// Batch lookup; unknown ids are simply absent from the result
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<UserProfile>>;
}

// ============================================================================
// Point Ledger Repository
// ============================================================================

#[async_trait]
pub trait PointLedgerRepository: Send + Sync {
    /// Per-user counters for the given users, one grouped lookup.
    /// Users without entries are absent.
    async fn counts_for_users(&self, user_ids: &[Snowflake]) -> RepoResult<Vec<PointCounts>>;

    /// Append an entry to the ledger
    async fn append(&self, entry: &PointLedgerEntry) -> RepoResult<()>;
}

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// `member` reports targeting any of the given users, newest first
    async fn find_member_reports_for_targets(
        &self,
        target_ids: &[Snowflake],
    ) -> RepoResult<Vec<Report>>;

    /// Reports of one type against one target, newest first
    async fn find_by_target(
        &self,
        report_type: ReportType,
        target_id: Snowflake,
    ) -> RepoResult<Vec<Report>>;

    /// File a new report. The ledger entry, when given, is written in the
    /// same transaction: either both rows exist afterwards or neither does.
    async fn create(
        &self,
        report: &Report,
        ledger_entry: Option<&PointLedgerEntry>,
    ) -> RepoResult<()>;
}
