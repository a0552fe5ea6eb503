//! Publishing envelopes to Redis channels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pool::{CacheResult, RedisPool};
use crate::pubsub::PubSubChannel;

/// What subscribers receive on every channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Upper snake case event name, e.g. `JOIN_REQUEST_APPROVED`
    #[serde(rename = "t")]
    pub event_type: String,
    #[serde(rename = "d")]
    pub data: serde_json::Value,
    pub published_at: DateTime<Utc>,
}

impl EventEnvelope {
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            published_at: Utc::now(),
        }
    }
}

/// Sends one envelope to a set of channels
#[derive(Debug, Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &RedisPool {
        &self.pool
    }

    /// PUBLISH to every channel in one pipelined round trip.
    /// Returns how many subscribers received the message in total.
    pub async fn fan_out(
        &self,
        channels: &[PubSubChannel],
        envelope: &EventEnvelope,
    ) -> CacheResult<u64> {
        if channels.is_empty() {
            return Ok(0);
        }

        let payload = serde_json::to_string(envelope)?;
        let mut pipe = redis::pipe();
        for channel in channels {
            pipe.publish(channel.name(), &payload);
        }

        let mut conn = self.pool.connection().await?;
        let receivers: Vec<u64> = pipe.query_async(&mut conn).await?;
        let delivered = receivers.iter().sum();

        tracing::debug!(
            event = %envelope.event_type,
            channels = channels.len(),
            delivered,
            "Event fanned out"
        );
        Ok(delivered)
    }
}
