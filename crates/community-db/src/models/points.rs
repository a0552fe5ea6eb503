//! Point ledger aggregate row

use sqlx::FromRow;

/// One row of the grouped `user_points` count query
#[derive(Debug, Clone, FromRow)]
pub struct PointCountsModel {
    pub user_id: i64,
    pub points_count: i64,
    pub report_count: i64,
}
