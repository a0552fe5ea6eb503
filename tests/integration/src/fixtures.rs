//! Test fixtures and data generators
//!
//! [`TestWorld`] wires the in-memory stores into a [`ServiceContext`] and
//! offers seeding helpers for communities, requesters and their history.

use std::sync::Arc;
use std::time::Duration;

use community_common::JwtService;
use community_core::entities::{Membership, PointLedgerEntry, Report, UserProfile};
use community_core::{
    PointLedgerRepository, ReportRepository, Snowflake, SnowflakeGenerator,
};
use community_service::{ServiceContext, ServiceContextBuilder};
use serde::{Deserialize, Serialize};

use crate::memory::{
    admin_membership, InMemoryMembershipRepository, InMemoryPointLedger, InMemoryReportRepository,
    InMemoryUserRepository, RecordingNotifier,
};

/// Secret shared by the test token issuer and the server
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Notify timeout of the test context
pub const TEST_NOTIFY_TIMEOUT: Duration = Duration::from_millis(200);

/// All stores behind one service context
pub struct TestWorld {
    pub memberships: Arc<InMemoryMembershipRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub points: Arc<InMemoryPointLedger>,
    pub reports: Arc<InMemoryReportRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub jwt: Arc<JwtService>,
    ids: Arc<SnowflakeGenerator>,
    ctx: ServiceContext,
}

impl TestWorld {
    pub fn new() -> Self {
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let users = Arc::new(InMemoryUserRepository::default());
        let points = Arc::new(InMemoryPointLedger::default());
        let reports = Arc::new(InMemoryReportRepository::new(points.clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        let jwt = Arc::new(JwtService::new(TEST_JWT_SECRET, 3600));
        let ids = Arc::new(SnowflakeGenerator::new(7));

        let ctx = ServiceContextBuilder::new()
            .membership_repo(memberships.clone())
            .user_repo(users.clone())
            .point_repo(points.clone())
            .report_repo(reports.clone())
            .notifier(notifier.clone())
            .notify_timeout(TEST_NOTIFY_TIMEOUT)
            .jwt_service(jwt.clone())
            .snowflake_generator(ids.clone())
            .build()
            .expect("all dependencies provided");

        Self {
            memberships,
            users,
            points,
            reports,
            notifier,
            jwt,
            ids,
            ctx,
        }
    }

    pub fn ctx(&self) -> &ServiceContext {
        &self.ctx
    }

    pub fn next_id(&self) -> Snowflake {
        self.ids.generate()
    }

    /// A user with a profile
    pub fn user(&self, username: &str) -> Snowflake {
        let id = self.next_id();
        let mut profile = UserProfile::new(id, username);
        profile.email = Some(format!("{username}@example.com"));
        self.users.insert(profile);
        id
    }

    /// A fresh community with one approved admin; returns (community, admin)
    pub fn community(&self) -> (Snowflake, Snowflake) {
        let community_id = self.next_id();
        let admin = self.user("moderator");
        self.memberships
            .seed(admin_membership(self.next_id(), community_id, admin));
        (community_id, admin)
    }

    /// A pending join request for the user
    pub fn pending_request(&self, community_id: Snowflake, user_id: Snowflake) -> Membership {
        let membership = Membership::request(self.next_id(), community_id, user_id);
        self.memberships.seed(membership.clone());
        membership
    }

    /// Append `count` ledger entries with the given tag
    pub async fn award(&self, user_id: Snowflake, tag: &str, count: usize) {
        for _ in 0..count {
            self.points
                .append(&PointLedgerEntry::new(user_id, tag))
                .await
                .expect("ledger append");
        }
    }

    /// A stored member report together with its ledger entry
    pub async fn file_report(&self, target: Snowflake, reporter: Snowflake, reason: &str) -> Report {
        let report = Report::against_member(
            self.next_id(),
            target,
            reporter,
            reason.to_string(),
            None,
        );
        self.reports
            .create(&report, Some(&PointLedgerEntry::report_received(target)))
            .await
            .expect("report insert");
        report
    }

    pub fn token_for(&self, user_id: Snowflake) -> String {
        self.jwt
            .issue_access_token(user_id)
            .expect("token issued")
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Wire types as seen by an HTTP client
// ============================================================================

/// Body of the approve/reject endpoints
#[derive(Debug, Serialize)]
pub struct ModerateBody {
    pub community_id: String,
}

impl ModerateBody {
    pub fn new(community_id: Snowflake) -> Self {
        Self {
            community_id: community_id.to_string(),
        }
    }
}

/// Body of the report endpoint
#[derive(Debug, Serialize)]
pub struct ReportBody {
    pub target_user_id: String,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportSummaryJson {
    pub id: String,
    pub reporter_id: String,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequestJson {
    pub id: String,
    pub user_id: String,
    pub community_id: String,
    pub user_name: String,
    pub email: String,
    pub avatar_url: String,
    pub points_count: i64,
    pub report_count: i64,
    pub reports: Vec<ReportSummaryJson>,
}

#[derive(Debug, Deserialize)]
pub struct WarningJson {
    pub kind: String,
    #[serde(default)]
    pub source: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRequestListJson {
    pub requests: Vec<JoinRequestJson>,
    pub warnings: Vec<WarningJson>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipJson {
    pub id: String,
    pub community_id: String,
    pub user_id: String,
    pub role: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MemberJson {
    pub user_id: String,
    pub user_name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkJson {
    pub affected: u64,
}

#[derive(Debug, Deserialize)]
pub struct ReportJson {
    pub id: String,
    pub report_type: String,
    pub target_id: String,
    pub reporter_id: String,
    pub reason: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorJson {
    pub error: String,
    pub code: String,
}
