//! PostgreSQL implementation of PointLedgerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::{PointCounts, PointLedgerEntry};
use community_core::traits::{PointLedgerRepository, RepoResult};
use community_core::value_objects::{PointType, Snowflake};

use crate::models::PointCountsModel;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of PointLedgerRepository
#[derive(Clone)]
pub struct PgPointLedgerRepository {
    pool: PgPool,
}

impl PgPointLedgerRepository {
    /// Create a new PgPointLedgerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PointLedgerRepository for PgPointLedgerRepository {
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn counts_for_users(&self, user_ids: &[Snowflake]) -> RepoResult<Vec<PointCounts>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PointCountsModel>(
            r#"
            SELECT user_id,
                   COUNT(*) FILTER (WHERE point_type <> $2) AS points_count,
                   COUNT(*) FILTER (WHERE point_type = $2)  AS report_count
            FROM user_points
            WHERE user_id = ANY($1)
            GROUP BY user_id
            "#,
        )
        .bind(raw_ids(user_ids))
        .bind(PointType::REPORT_RECEIVED)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(PointCounts::from).collect())
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, point_type = %entry.point_type))]
    async fn append(&self, entry: &PointLedgerEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_points (user_id, point_type)
            VALUES ($1, $2)
            "#,
        )
        .bind(entry.user_id.into_inner())
        .bind(entry.point_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
