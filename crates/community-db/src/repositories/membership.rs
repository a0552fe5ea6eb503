//! PostgreSQL implementation of MembershipRepository
//!
//! Every moderation mutation is a single conditional statement, so racing
//! moderators cannot both succeed on the same row.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use community_core::entities::Membership;
use community_core::error::DomainError;
use community_core::traits::{MembershipRepository, RepoResult};
use community_core::value_objects::Snowflake;

use crate::mappers::{memberships_from_models, MembershipInsert};
use crate::models::MembershipModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MembershipRepository
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    /// Create a new PgMembershipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    #[instrument(skip(self))]
    async fn find(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, community_id, user_id, role, status, joined_at
            FROM community_members
            WHERE id = $1 AND community_id = $2
            "#,
        )
        .bind(id.into_inner())
        .bind(community_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Membership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let results = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, community_id, user_id, role, status, joined_at
            FROM community_members
            WHERE community_id = $1 AND status = 'pending'
            ORDER BY joined_at DESC, id DESC
            "#,
        )
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        memberships_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Membership>> {
        let result = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, community_id, user_id, role, status, joined_at
            FROM community_members
            WHERE community_id = $1 AND user_id = $2 AND status IN ('pending', 'approved')
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Membership::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_approved(
        &self,
        community_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> RepoResult<Vec<Membership>> {
        let limit = limit.clamp(1, 1000);

        // 0 sorts before every real user id
        let results = sqlx::query_as::<_, MembershipModel>(
            r#"
            SELECT id, community_id, user_id, role, status, joined_at
            FROM community_members
            WHERE community_id = $1 AND status = 'approved' AND user_id > $2
            ORDER BY user_id
            LIMIT $3
            "#,
        )
        .bind(community_id.into_inner())
        .bind(after.map_or(0, Snowflake::into_inner))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        memberships_from_models(results)
    }

    #[instrument(skip(self))]
    async fn is_admin(&self, community_id: Snowflake, user_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM community_members
                WHERE community_id = $1 AND user_id = $2
                  AND status = 'approved' AND role = 'admin'
            )
            "#,
        )
        .bind(community_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, membership), fields(membership_id = %membership.id))]
    async fn create(&self, membership: &Membership) -> RepoResult<()> {
        let insert = MembershipInsert::new(membership);

        sqlx::query(
            r#"
            INSERT INTO community_members (id, community_id, user_id, role, status, joined_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(insert.id)
        .bind(insert.community_id)
        .bind(insert.user_id)
        .bind(insert.role)
        .bind(insert.status)
        .bind(membership.joined_at)
        .execute(&self.pool)
        .await
        // Only the live-membership partial index can collide for fresh ids
        .map_err(|e| map_unique_violation(e, || DomainError::JoinRequestAlreadyPending))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn approve_pending(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE community_members
            SET status = 'approved'
            WHERE id = $1 AND community_id = $2 AND status = 'pending'
            "#,
        )
        .bind(id.into_inner())
        .bind(community_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn delete_pending(&self, community_id: Snowflake, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM community_members
            WHERE id = $1 AND community_id = $2 AND status = 'pending'
            "#,
        )
        .bind(id.into_inner())
        .bind(community_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn approve_all_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let results = sqlx::query_as::<_, MembershipModel>(
            r#"
            UPDATE community_members
            SET status = 'approved'
            WHERE community_id = $1 AND status = 'pending'
            RETURNING id, community_id, user_id, role, status, joined_at
            "#,
        )
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(affected = results.len(), "Bulk approved pending memberships");
        memberships_from_models(results)
    }

    #[instrument(skip(self))]
    async fn delete_all_pending(&self, community_id: Snowflake) -> RepoResult<Vec<Membership>> {
        let results = sqlx::query_as::<_, MembershipModel>(
            r#"
            DELETE FROM community_members
            WHERE community_id = $1 AND status = 'pending'
            RETURNING id, community_id, user_id, role, status, joined_at
            "#,
        )
        .bind(community_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        debug!(affected = results.len(), "Bulk deleted pending memberships");
        memberships_from_models(results)
    }

    async fn health_check(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
