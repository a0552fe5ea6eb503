//! Point counts model -> entity mapper

use community_core::entities::PointCounts;
use community_core::value_objects::Snowflake;

use crate::models::PointCountsModel;

impl From<PointCountsModel> for PointCounts {
    fn from(model: PointCountsModel) -> Self {
        PointCounts {
            user_id: Snowflake::new(model.user_id),
            points_count: model.points_count,
            report_count: model.report_count,
        }
    }
}
