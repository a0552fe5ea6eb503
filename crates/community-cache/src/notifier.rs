//! Redis-backed [`MembershipNotifier`]
//!
//! Each event goes to the community's moderation channel (when it has a
//! community) and to every affected user's channel.

use async_trait::async_trait;
use tracing::instrument;

use community_core::error::DomainError;
use community_core::events::MembershipEvent;
use community_core::traits::{MembershipNotifier, RepoResult};

use crate::pool::CacheError;
use crate::pubsub::{EventEnvelope, PubSubChannel, Publisher};

fn notifier_error(e: CacheError) -> DomainError {
    DomainError::NotifierError(e.to_string())
}

/// Channels an event is fanned out to
pub fn channels_for(event: &MembershipEvent) -> Vec<PubSubChannel> {
    event
        .community_id()
        .map(PubSubChannel::community)
        .into_iter()
        .chain(event.affected_users().into_iter().map(PubSubChannel::user))
        .collect()
}

#[derive(Clone)]
pub struct RedisMembershipNotifier {
    publisher: Publisher,
}

impl RedisMembershipNotifier {
    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl MembershipNotifier for RedisMembershipNotifier {
    #[instrument(skip(self, event), fields(event = event.event_name()))]
    async fn notify(&self, event: &MembershipEvent) -> RepoResult<()> {
        let data = serde_json::to_value(event)
            .map_err(|e| DomainError::NotifierError(e.to_string()))?;
        let envelope = EventEnvelope::new(event.event_name(), data);

        self.publisher
            .fan_out(&channels_for(event), &envelope)
            .await
            .map_err(notifier_error)?;
        Ok(())
    }

    async fn health_check(&self) -> RepoResult<()> {
        self.publisher.pool().ping().await.map_err(notifier_error)
    }
}
