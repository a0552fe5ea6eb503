//! Service context - dependency container for services
//!
//! Holds the repository ports, the notifier and the id generator. Everything
//! is behind a trait object so the same services run against PostgreSQL or
//! the in-memory stores used by the tests.

use std::sync::Arc;
use std::time::Duration;

use community_common::JwtService;
use community_core::events::MembershipEvent;
use community_core::traits::{
    MembershipNotifier, MembershipRepository, PointLedgerRepository, ReportRepository,
    UserRepository,
};
use community_core::{Snowflake, SnowflakeGenerator};
use tracing::warn;

use super::error::{ServiceError, ServiceResult};

/// Longest a mutation waits on the notifier before moving on
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    membership_repo: Arc<dyn MembershipRepository>,
    user_repo: Arc<dyn UserRepository>,
    point_repo: Arc<dyn PointLedgerRepository>,
    report_repo: Arc<dyn ReportRepository>,

    notifier: Arc<dyn MembershipNotifier>,
    notify_timeout: Duration,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    // === Repositories ===

    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn point_repo(&self) -> &dyn PointLedgerRepository {
        self.point_repo.as_ref()
    }

    pub fn report_repo(&self) -> &dyn ReportRepository {
        self.report_repo.as_ref()
    }

    // === Notifications ===

    pub fn notifier(&self) -> &dyn MembershipNotifier {
        self.notifier.as_ref()
    }

    /// Deliver an event after its mutation committed
    ///
    /// Failures and deliveries slower than the notify timeout are logged and
    /// swallowed: the caller's operation already succeeded.
    pub async fn publish(&self, event: MembershipEvent) {
        match tokio::time::timeout(self.notify_timeout, self.notifier.notify(&event)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(
                event = event.event_name(),
                error = %e,
                "Failed to deliver membership notification"
            ),
            Err(_) => warn!(
                event = event.event_name(),
                timeout = ?self.notify_timeout,
                "Membership notification timed out"
            ),
        }
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    point_repo: Option<Arc<dyn PointLedgerRepository>>,
    report_repo: Option<Arc<dyn ReportRepository>>,
    notifier: Option<Arc<dyn MembershipNotifier>>,
    notify_timeout: Option<Duration>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn point_repo(mut self, repo: Arc<dyn PointLedgerRepository>) -> Self {
        self.point_repo = Some(repo);
        self
    }

    pub fn report_repo(mut self, repo: Arc<dyn ReportRepository>) -> Self {
        self.report_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn MembershipNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = Some(timeout);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
        }

        Ok(ServiceContext {
            membership_repo: required(self.membership_repo, "membership_repo")?,
            user_repo: required(self.user_repo, "user_repo")?,
            point_repo: required(self.point_repo, "point_repo")?,
            report_repo: required(self.report_repo, "report_repo")?,
            notifier: required(self.notifier, "notifier")?,
            notify_timeout: self.notify_timeout.unwrap_or(DEFAULT_NOTIFY_TIMEOUT),
            jwt_service: required(self.jwt_service, "jwt_service")?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::default())),
        })
    }
}
