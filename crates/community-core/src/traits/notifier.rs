//! Notification port

use async_trait::async_trait;

use crate::events::MembershipEvent;
use crate::traits::RepoResult;

/// Fan-out of membership events to interested clients
///
/// Callers treat delivery as best effort: a failed `notify` is logged and
/// never turns a committed mutation into an error.
#[async_trait]
pub trait MembershipNotifier: Send + Sync {
    async fn notify(&self, event: &MembershipEvent) -> RepoResult<()>;

    /// Backing transport is reachable
    async fn health_check(&self) -> RepoResult<()>;
}
