//! PostgreSQL implementation of ReportRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::{PointLedgerEntry, Report, ReportType};
use community_core::traits::{ReportRepository, RepoResult};
use community_core::value_objects::Snowflake;

use crate::mappers::{reports_from_models, ReportInsert};
use crate::models::ReportModel;

use super::error::{map_db_error, raw_ids};

/// PostgreSQL implementation of ReportRepository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    /// Create a new PgReportRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for PgReportRepository {
    #[instrument(skip(self, target_ids), fields(count = target_ids.len()))]
    async fn find_member_reports_for_targets(
        &self,
        target_ids: &[Snowflake],
    ) -> RepoResult<Vec<Report>> {
        if target_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReportModel>(
            r#"
            SELECT id, report_type, target_id, reporter_id, reason, details, status, created_at
            FROM reports
            WHERE report_type = 'member' AND target_id = ANY($1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(raw_ids(target_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reports_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_by_target(
        &self,
        report_type: ReportType,
        target_id: Snowflake,
    ) -> RepoResult<Vec<Report>> {
        let results = sqlx::query_as::<_, ReportModel>(
            r#"
            SELECT id, report_type, target_id, reporter_id, reason, details, status, created_at
            FROM reports
            WHERE report_type = $1 AND target_id = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(report_type.as_str())
        .bind(target_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        reports_from_models(results)
    }

    #[instrument(skip(self, report, ledger_entry), fields(report_id = %report.id, target_id = %report.target_id))]
    async fn create(
        &self,
        report: &Report,
        ledger_entry: Option<&PointLedgerEntry>,
    ) -> RepoResult<()> {
        let insert = ReportInsert::new(report);
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO reports (id, report_type, target_id, reporter_id, reason, details, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.id)
        .bind(insert.report_type)
        .bind(insert.target_id)
        .bind(insert.reporter_id)
        .bind(insert.reason)
        .bind(insert.details)
        .bind(insert.status)
        .bind(report.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if let Some(entry) = ledger_entry {
            sqlx::query(
                r#"
                INSERT INTO user_points (user_id, point_type)
                VALUES ($1, $2)
                "#,
            )
            .bind(entry.user_id.into_inner())
            .bind(entry.point_type.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
