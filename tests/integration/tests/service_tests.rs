//! Service-level tests against the in-memory stores
//!
//! Run with: cargo test -p integration-tests --test service_tests

use std::sync::Arc;

use community_core::{DomainError, MembershipStatus, MembershipEvent, Snowflake};
use community_service::dto::{CreateReportRequest, EnrichmentSource, FetchWarning};
use community_service::{
    MembershipService, ModerationService, ReportService, ServiceError,
};
use integration_tests::{TestWorld, TEST_NOTIFY_TIMEOUT};

fn is_join_request_not_found(err: &ServiceError) -> bool {
    matches!(err, ServiceError::Domain(DomainError::JoinRequestNotFound(_)))
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_pending_newest_first_with_enrichment() {
    let world = TestWorld::new();
    let (community, _admin) = world.community();
    let alice = world.user("alice");
    let bob = world.user("bob");

    let first = world.pending_request(community, alice);
    let second = world.pending_request(community, bob);

    world.award(alice, "event_attended", 3).await;
    world.file_report(alice, bob, "spam").await;

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    assert!(list.warnings.is_empty());
    assert_eq!(list.requests.len(), 2);
    // Same timestamp resolution falls back to id order, newest first
    assert_eq!(list.requests[0].id, second.id);
    assert_eq!(list.requests[1].id, first.id);

    let alice_view = &list.requests[1];
    assert_eq!(alice_view.user_name, "alice");
    assert_eq!(alice_view.email, "alice@example.com");
    assert_eq!(alice_view.points_count, 3);
    assert_eq!(alice_view.report_count, 1);
    assert_eq!(alice_view.reports.len(), 1);
    assert_eq!(alice_view.reports[0].reporter_id, bob);

    let bob_view = &list.requests[0];
    assert_eq!(bob_view.points_count, 0);
    assert_eq!(bob_view.report_count, 0);
    assert!(bob_view.reports.is_empty());
}

#[tokio::test]
async fn test_list_only_covers_the_requested_community() {
    let world = TestWorld::new();
    let (community_a, _) = world.community();
    let (community_b, _) = world.community();
    let user = world.user("carol");

    world.pending_request(community_a, user);
    world.pending_request(community_b, world.user("dave"));

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community_a)
        .await
        .unwrap();

    assert_eq!(list.requests.len(), 1);
    assert_eq!(list.requests[0].user_id, user);
}

#[tokio::test]
async fn test_points_aggregation_partitions_reports() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("erin");
    world.pending_request(community, user);

    // N = 9 entries, k = 4 of them report_received
    world.award(user, "event_attended", 2).await;
    world.award(user, "post_created", 3).await;
    world.award(user, "report_received", 4).await;

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    let view = &list.requests[0];
    assert_eq!(view.points_count, 9 - 4);
    assert_eq!(view.report_count, 4);
}

#[tokio::test]
async fn test_profile_failure_still_lists_requests() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("frank");
    let request = world.pending_request(community, user);
    world.award(user, "post_created", 2).await;

    world.users.fail.set(true);

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    assert_eq!(list.requests.len(), 1);
    let view = &list.requests[0];
    assert_eq!(view.id, request.id);
    assert_eq!(view.user_name, "Unknown User");
    assert_eq!(view.email, "");
    assert_eq!(view.avatar_url, "");
    // Other enrichment is unaffected
    assert_eq!(view.points_count, 2);
    assert_eq!(
        list.warnings,
        vec![FetchWarning::partial(EnrichmentSource::Profiles)]
    );
}

#[tokio::test]
async fn test_missing_profile_uses_placeholder() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    // No profile stored for this id
    let ghost = world.next_id();
    world.pending_request(community, ghost);

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    assert_eq!(list.requests[0].user_name, "Unknown User");
    assert!(list.is_degraded());
}

#[tokio::test]
async fn test_points_and_reports_failures_default_to_empty() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("gina");
    world.pending_request(community, user);

    world.points.fail.set(true);
    world.reports.fail.set(true);

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    let view = &list.requests[0];
    assert_eq!(view.user_name, "gina");
    assert_eq!(view.points_count, 0);
    assert_eq!(view.report_count, 0);
    assert!(view.reports.is_empty());
    assert!(list
        .warnings
        .contains(&FetchWarning::partial(EnrichmentSource::Points)));
    assert!(list
        .warnings
        .contains(&FetchWarning::partial(EnrichmentSource::Reports)));
}

#[tokio::test]
async fn test_membership_fetch_failure_is_a_transient_warning() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    world.pending_request(community, world.user("hank"));

    world.memberships.fail.set(true);

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();

    assert!(list.requests.is_empty());
    assert_eq!(list.warnings, vec![FetchWarning::transient()]);
}

#[tokio::test]
async fn test_list_rejects_missing_community_id() {
    let world = TestWorld::new();
    let err = ModerationService::new(world.ctx())
        .list_pending_requests(Snowflake::default())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// ============================================================================
// Approve / Reject
// ============================================================================

#[tokio::test]
async fn test_approve_scenario() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("ivy");
    let request = world.pending_request(community, user);

    let response = ModerationService::new(world.ctx())
        .approve(request.id, community)
        .await
        .unwrap();

    assert_eq!(response.id, request.id);
    assert_eq!(response.status, MembershipStatus::Approved);
    assert_eq!(
        world.memberships.get(request.id).unwrap().status,
        MembershipStatus::Approved
    );

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();
    assert!(list.requests.iter().all(|r| r.id != request.id));

    let events = world.notifier.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], MembershipEvent::JoinRequestApproved(e) if e.user_id == user));
}

#[tokio::test]
async fn test_approve_twice_reports_not_found() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let request = world.pending_request(community, world.user("jack"));
    let service = ModerationService::new(world.ctx());

    service.approve(request.id, community).await.unwrap();
    let err = service.approve(request.id, community).await.unwrap_err();

    assert!(is_join_request_not_found(&err));
    assert_eq!(err.status_code(), 404);
    assert_eq!(world.notifier.events().len(), 1);
}

#[tokio::test]
async fn test_concurrent_approve_has_single_winner() {
    let world = Arc::new(TestWorld::new());
    let (community, _) = world.community();
    let request = world.pending_request(community, world.user("kate"));
    let members_before = world.memberships.len();

    let attempts = (0..8).map(|_| {
        let world = Arc::clone(&world);
        tokio::spawn(async move {
            ModerationService::new(world.ctx())
                .approve(request.id, community)
                .await
        })
    });
    let results = futures::future::join_all(attempts).await;

    let (ok, failed): (Vec<_>, Vec<_>) = results
        .into_iter()
        .map(|joined| joined.expect("task completed"))
        .partition(Result::is_ok);

    assert_eq!(ok.len(), 1);
    assert!(failed.iter().all(|r| r
        .as_ref()
        .err()
        .is_some_and(is_join_request_not_found)));
    // No duplicate membership was created
    assert_eq!(world.memberships.len(), members_before);
    assert_eq!(world.notifier.event_names(), vec!["JOIN_REQUEST_APPROVED"]);
}

#[tokio::test]
async fn test_reject_removes_request() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("liam");
    let request = world.pending_request(community, user);
    let report = world.file_report(user, world.user("mia"), "abuse").await;

    let service = ModerationService::new(world.ctx());
    service.reject(request.id, community).await.unwrap();

    assert!(world.memberships.get(request.id).is_none());
    let list = service.list_pending_requests(community).await.unwrap();
    assert!(list.requests.iter().all(|r| r.id != request.id));

    // History about the user survives the rejection
    assert_eq!(world.reports.len(), 1);
    assert_eq!(world.points.entries_for(user).len(), 1);
    let reports = ReportService::new(world.ctx())
        .reports_for_member(user)
        .await
        .unwrap();
    assert_eq!(reports[0].id, report.id);

    assert_eq!(world.notifier.event_names(), vec!["JOIN_REQUEST_REJECTED"]);

    // Second reject is reported as not found; callers treat it as done
    let err = service.reject(request.id, community).await.unwrap_err();
    assert!(is_join_request_not_found(&err));
}

#[tokio::test]
async fn test_cross_community_guard() {
    let world = TestWorld::new();
    let (community_a, _) = world.community();
    let (community_b, _) = world.community();
    let request = world.pending_request(community_a, world.user("noah"));
    let service = ModerationService::new(world.ctx());

    let err = service.approve(request.id, community_b).await.unwrap_err();
    assert!(is_join_request_not_found(&err));
    let err = service.reject(request.id, community_b).await.unwrap_err();
    assert!(is_join_request_not_found(&err));

    let stored = world.memberships.get(request.id).unwrap();
    assert_eq!(stored.status, MembershipStatus::Pending);
    assert!(world.notifier.events().is_empty());
}

#[tokio::test]
async fn test_approve_validates_ids_before_touching_stores() {
    let world = TestWorld::new();
    world.memberships.fail.set(true);
    let service = ModerationService::new(world.ctx());

    let err = service
        .approve(Snowflake::new(5), Snowflake::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = service
        .reject(Snowflake::default(), Snowflake::new(5))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_store_failure_on_approve_is_a_server_error() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let request = world.pending_request(community, world.user("olga"));
    world.memberships.fail.set(true);

    let err = ModerationService::new(world.ctx())
        .approve(request.id, community)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_notifier_failure_does_not_fail_approve() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let request = world.pending_request(community, world.user("pete"));
    world.notifier.fail.set(true);

    ModerationService::new(world.ctx())
        .approve(request.id, community)
        .await
        .unwrap();

    assert_eq!(
        world.memberships.get(request.id).unwrap().status,
        MembershipStatus::Approved
    );
}

#[tokio::test]
async fn test_stalled_notifier_does_not_hold_approve() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let request = world.pending_request(community, world.user("quinn"));
    world.notifier.stall.set(true);

    let approved = tokio::time::timeout(
        TEST_NOTIFY_TIMEOUT * 10,
        ModerationService::new(world.ctx()).approve(request.id, community),
    )
    .await;

    assert!(matches!(approved, Ok(Ok(_))));
    assert_eq!(
        world.memberships.get(request.id).unwrap().status,
        MembershipStatus::Approved
    );
    assert!(world.notifier.events().is_empty());
}

// ============================================================================
// Bulk
// ============================================================================

#[tokio::test]
async fn test_bulk_on_empty_queue_is_a_no_op() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let rows_before = world.memberships.len();
    let service = ModerationService::new(world.ctx());

    assert_eq!(service.approve_all(community).await.unwrap().affected, 0);
    assert_eq!(service.reject_all(community).await.unwrap().affected, 0);

    assert_eq!(world.memberships.len(), rows_before);
    assert!(world.notifier.events().is_empty());
}

#[tokio::test]
async fn test_reject_all_scenario() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let (other, _) = world.community();
    for name in ["quinn", "rosa", "sam"] {
        world.pending_request(community, world.user(name));
    }
    let untouched = world.pending_request(other, world.user("tina"));

    let service = ModerationService::new(world.ctx());
    let result = service.reject_all(community).await.unwrap();
    assert_eq!(result.affected, 3);

    let list = service.list_pending_requests(community).await.unwrap();
    assert!(list.requests.is_empty());
    assert!(world.memberships.get(untouched.id).is_some());

    let events = world.notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_name(), "JOIN_REQUESTS_BULK_REJECTED");
    assert_eq!(events[0].affected_users().len(), 3);
}

#[tokio::test]
async fn test_approve_all_leaves_existing_members_alone() {
    let world = TestWorld::new();
    let (community, admin) = world.community();
    let a = world.pending_request(community, world.user("uma"));
    let b = world.pending_request(community, world.user("vic"));

    let service = ModerationService::new(world.ctx());
    let result = service.approve_all(community).await.unwrap();
    assert_eq!(result.affected, 2);

    for id in [a.id, b.id] {
        assert_eq!(world.memberships.get(id).unwrap().status, MembershipStatus::Approved);
    }

    let members = MembershipService::new(world.ctx())
        .list_members(community, None, None)
        .await
        .unwrap();
    assert_eq!(members.len(), 3);
    assert!(members.iter().any(|m| m.user_id == admin));

    // Running it again finds nothing
    assert_eq!(service.approve_all(community).await.unwrap().affected, 0);
}

// ============================================================================
// Authorization
// ============================================================================

#[tokio::test]
async fn test_require_moderator() {
    let world = TestWorld::new();
    let (community, admin) = world.community();
    let (other_community, _) = world.community();
    let member = world.user("wade");
    let request = world.pending_request(community, member);
    let service = ModerationService::new(world.ctx());

    service.require_moderator(community, admin).await.unwrap();

    let err = service
        .require_moderator(other_community, admin)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(err.error_code(), "NOT_MODERATOR");

    // An approved plain member is not a moderator either
    service.approve(request.id, community).await.unwrap();
    assert!(service.require_moderator(community, member).await.is_err());
}

// ============================================================================
// Membership requests
// ============================================================================

#[tokio::test]
async fn test_request_to_join_lifecycle() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("xena");
    let service = MembershipService::new(world.ctx());

    let created = service.request_to_join(community, user).await.unwrap();
    assert_eq!(created.status, MembershipStatus::Pending);
    assert_eq!(world.notifier.event_names(), vec!["JOIN_REQUESTED"]);

    let err = service.request_to_join(community, user).await.unwrap_err();
    assert_eq!(err.error_code(), "JOIN_REQUEST_ALREADY_PENDING");
    assert_eq!(err.status_code(), 409);

    ModerationService::new(world.ctx())
        .approve(created.id, community)
        .await
        .unwrap();

    let err = service.request_to_join(community, user).await.unwrap_err();
    assert_eq!(err.error_code(), "ALREADY_MEMBER");

    let mine = service.get_membership(community, user).await.unwrap();
    assert_eq!(mine.status, MembershipStatus::Approved);
}

#[tokio::test]
async fn test_rejected_user_may_ask_again() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let user = world.user("yuri");
    let service = MembershipService::new(world.ctx());

    let first = service.request_to_join(community, user).await.unwrap();
    ModerationService::new(world.ctx())
        .reject(first.id, community)
        .await
        .unwrap();

    let err = service.get_membership(community, user).await.unwrap_err();
    assert!(err.is_not_found());

    let second = service.request_to_join(community, user).await.unwrap();
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn test_list_members_pages_by_user_id() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    for name in ["a1", "a2", "a3"] {
        world.pending_request(community, world.user(name));
    }
    ModerationService::new(world.ctx())
        .approve_all(community)
        .await
        .unwrap();

    let service = MembershipService::new(world.ctx());
    let page = service.list_members(community, Some(2), None).await.unwrap();
    assert_eq!(page.len(), 2);
    assert!(page[0].user_id < page[1].user_id);

    let rest = service
        .list_members(community, Some(2), Some(page[1].user_id))
        .await
        .unwrap();
    assert_eq!(rest.len(), 2);
    assert!(rest[0].user_id > page[1].user_id);
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_report_member_counts_against_target() {
    let world = TestWorld::new();
    let (community, _) = world.community();
    let target = world.user("zoe");
    let reporter = world.user("adam");
    world.pending_request(community, target);

    let report = ReportService::new(world.ctx())
        .report_member(
            reporter,
            CreateReportRequest {
                target_user_id: target,
                reason: "  harassment ".to_string(),
                details: Some("   ".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(report.reason, "harassment");
    assert_eq!(report.details, None);
    assert_eq!(report.reporter_id, reporter);

    let ledger = world.points.entries_for(target);
    assert_eq!(ledger.len(), 1);
    assert!(ledger[0].point_type.is_report());

    let list = ModerationService::new(world.ctx())
        .list_pending_requests(community)
        .await
        .unwrap();
    assert_eq!(list.requests[0].report_count, 1);
    assert_eq!(list.requests[0].reports[0].reason, "harassment");

    assert_eq!(world.notifier.event_names(), vec!["MEMBER_REPORTED"]);
}

#[tokio::test]
async fn test_report_is_not_stored_when_ledger_write_fails() {
    let world = TestWorld::new();
    let target = world.user("ivy");
    let reporter = world.user("oscar");
    let service = ReportService::new(world.ctx());
    let request = || CreateReportRequest {
        target_user_id: target,
        reason: "spam".to_string(),
        details: None,
    };

    world.points.fail.set(true);
    let err = service.report_member(reporter, request()).await.unwrap_err();
    assert_eq!(err.status_code(), 500);
    assert!(world.reports.is_empty());
    assert!(world.points.entries_for(target).is_empty());
    assert!(world.notifier.events().is_empty());

    world.points.fail.set(false);
    service.report_member(reporter, request()).await.unwrap();
    assert_eq!(world.reports.len(), 1);
    assert_eq!(world.points.entries_for(target).len(), 1);
}

#[tokio::test]
async fn test_report_validation() {
    let world = TestWorld::new();
    let user = world.user("bea");
    let service = ReportService::new(world.ctx());

    let err = service
        .report_member(
            user,
            CreateReportRequest {
                target_user_id: user,
                reason: "spam".to_string(),
                details: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "CANNOT_REPORT_SELF");

    let err = service
        .report_member(
            user,
            CreateReportRequest {
                target_user_id: world.user("cal"),
                reason: "   ".to_string(),
                details: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert!(world.reports.is_empty());
}
