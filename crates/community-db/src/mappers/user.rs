//! User profile model -> entity mapper

use community_core::entities::UserProfile;
use community_core::value_objects::Snowflake;

use crate::models::UserProfileModel;

impl From<UserProfileModel> for UserProfile {
    fn from(model: UserProfileModel) -> Self {
        UserProfile {
            id: Snowflake::new(model.id),
            username: model.username,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            email: model.email,
        }
    }
}
