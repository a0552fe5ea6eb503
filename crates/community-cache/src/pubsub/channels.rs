//! Pub/Sub channel naming.

use community_core::Snowflake;

/// Prefix for a community's moderation feed
pub const COMMUNITY_CHANNEL_PREFIX: &str = "community:";
/// Prefix for user-specific events
pub const USER_CHANNEL_PREFIX: &str = "user:";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Moderators watching a community's join queue
    Community(Snowflake),
    /// All sessions of one user
    User(Snowflake),
}

impl PubSubChannel {
    #[must_use]
    pub fn community(community_id: Snowflake) -> Self {
        Self::Community(community_id)
    }

    #[must_use]
    pub fn user(user_id: Snowflake) -> Self {
        Self::User(user_id)
    }

    /// Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Community(id) => format!("{COMMUNITY_CHANNEL_PREFIX}{id}:moderation"),
            Self::User(id) => format!("{USER_CHANNEL_PREFIX}{id}"),
        }
    }

    /// Parse a channel name produced by [`name`](Self::name)
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(rest) = name.strip_prefix(COMMUNITY_CHANNEL_PREFIX) {
            let id = rest.strip_suffix(":moderation")?;
            return Snowflake::parse(id).ok().map(Self::Community);
        }
        name.strip_prefix(USER_CHANNEL_PREFIX)
            .and_then(|id| Snowflake::parse(id).ok())
            .map(Self::User)
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
