//! Channel naming and publishing.

mod channels;
mod publisher;

pub use channels::{PubSubChannel, COMMUNITY_CHANNEL_PREFIX, USER_CHANNEL_PREFIX};
pub use publisher::{EventEnvelope, Publisher};
