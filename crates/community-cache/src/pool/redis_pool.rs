//! Pooled Redis connections for event delivery.

use std::time::Duration;

use community_common::RedisConfig;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime, Timeouts};

/// Bound on waiting for, opening and recycling a pooled connection
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(1);

/// Failures talking to Redis
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("invalid redis pool settings: {0}")]
    Setup(String),

    #[error("no redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("could not encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Cheaply cloneable handle to a deadpool-managed Redis pool
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.inner.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

/// Strip `user:password@` from a URL before it reaches the logs
fn redacted(url: &str) -> &str {
    url.rsplit('@').next().unwrap_or(url)
}

impl RedisPool {
    /// Build the pool without dialing; the first checkout opens a connection.
    pub fn connect(config: &RedisConfig) -> CacheResult<Self> {
        let mut settings = Config::from_url(&config.url);
        settings.pool = Some(PoolConfig {
            max_size: config.max_connections as usize,
            timeouts: Timeouts {
                wait: Some(CHECKOUT_TIMEOUT),
                create: Some(CHECKOUT_TIMEOUT),
                recycle: Some(CHECKOUT_TIMEOUT),
            },
            ..PoolConfig::default()
        });

        let inner = settings
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| CacheError::Setup(e.to_string()))?;

        tracing::info!(
            host = %redacted(&config.url),
            max_connections = config.max_connections,
            "Redis pool ready"
        );
        Ok(Self { inner })
    }

    pub async fn connection(&self) -> CacheResult<Connection> {
        Ok(self.inner.get().await?)
    }

    pub async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}
