//! # community-cache
//!
//! Redis connection pool and pub/sub delivery of membership events.
//!
//! ```ignore
//! use community_cache::{Publisher, RedisMembershipNotifier, RedisPool};
//!
//! let pool = RedisPool::connect(&config.redis)?;
//! let notifier = RedisMembershipNotifier::new(Publisher::new(pool));
//! notifier.notify(&MembershipEvent::approved(&membership)).await?;
//! ```

pub mod notifier;
pub mod pool;
pub mod pubsub;

pub use notifier::RedisMembershipNotifier;
pub use pool::{CacheError, CacheResult, RedisPool};
pub use pubsub::{
    EventEnvelope, PubSubChannel, Publisher, COMMUNITY_CHANNEL_PREFIX, USER_CHANNEL_PREFIX,
};
