//! User profile entity - the public face of an account

use crate::value_objects::Snowflake;

/// Profile data moderators see next to a join request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Snowflake,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            full_name: None,
            avatar_url: None,
            email: None,
        }
    }

    /// Name to show in listings: full name when set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}
