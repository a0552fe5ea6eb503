//! Moderation service
//!
//! The admin-facing join request queue: listing with trust signals, per-item
//! approve/reject and the bulk variants.

use std::collections::{HashMap, HashSet};

use community_core::entities::{Membership, PointCounts, UserProfile};
use community_core::{DomainError, MembershipEvent, Snowflake};
use tracing::{error, info, instrument, warn};

use crate::dto::{
    BulkModerationResponse, EnrichmentSource, FetchWarning, JoinRequestList, JoinRequestView,
    MembershipResponse, ReportSummary,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fail with `NotModerator` unless the actor is an approved admin of the community
    #[instrument(skip(self))]
    pub async fn require_moderator(
        &self,
        community_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        require_id("community_id", community_id)?;
        require_id("user_id", actor_id)?;

        if self.ctx.membership_repo().is_admin(community_id, actor_id).await? {
            Ok(())
        } else {
            warn!(community_id = %community_id, actor_id = %actor_id, "Moderation attempted by non-admin");
            Err(DomainError::NotModerator.into())
        }
    }

    /// Pending requests of a community, newest first, with profile, points and reports
    ///
    /// Store failures never reach the caller; they surface as warnings on the listing.
    #[instrument(skip(self))]
    pub async fn list_pending_requests(
        &self,
        community_id: Snowflake,
    ) -> ServiceResult<JoinRequestList> {
        require_id("community_id", community_id)?;

        let pending = match self.ctx.membership_repo().find_pending(community_id).await {
            Ok(pending) => pending,
            Err(e) => {
                error!(community_id = %community_id, error = %e, "Failed to fetch pending join requests");
                return Ok(JoinRequestList::unavailable());
            }
        };

        if pending.is_empty() {
            return Ok(JoinRequestList::default());
        }

        let mut seen = HashSet::with_capacity(pending.len());
        let user_ids: Vec<Snowflake> = pending
            .iter()
            .map(|m| m.user_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let (profiles, counts, reports) = tokio::join!(
            self.ctx.user_repo().find_by_ids(&user_ids),
            self.ctx.point_repo().counts_for_users(&user_ids),
            self.ctx.report_repo().find_member_reports_for_targets(&user_ids),
        );

        let mut warnings = Vec::new();

        let profiles: HashMap<Snowflake, UserProfile> = match profiles {
            Ok(profiles) => {
                let profiles: HashMap<_, _> = profiles.into_iter().map(|p| (p.id, p)).collect();
                if user_ids.iter().any(|id| !profiles.contains_key(id)) {
                    warn!(community_id = %community_id, "Some requesters have no profile");
                    warnings.push(FetchWarning::partial(EnrichmentSource::Profiles));
                }
                profiles
            }
            Err(e) => {
                warn!(community_id = %community_id, error = %e, "Profile enrichment failed");
                warnings.push(FetchWarning::partial(EnrichmentSource::Profiles));
                HashMap::new()
            }
        };

        let counts: HashMap<Snowflake, PointCounts> = match counts {
            Ok(counts) => counts.into_iter().map(|c| (c.user_id, c)).collect(),
            Err(e) => {
                warn!(community_id = %community_id, error = %e, "Point enrichment failed");
                warnings.push(FetchWarning::partial(EnrichmentSource::Points));
                HashMap::new()
            }
        };

        let mut reports_by_target: HashMap<Snowflake, Vec<ReportSummary>> = HashMap::new();
        match reports {
            Ok(reports) => {
                for report in &reports {
                    reports_by_target
                        .entry(report.target_id)
                        .or_default()
                        .push(ReportSummary::from(report));
                }
            }
            Err(e) => {
                warn!(community_id = %community_id, error = %e, "Report enrichment failed");
                warnings.push(FetchWarning::partial(EnrichmentSource::Reports));
            }
        }

        let requests = pending
            .iter()
            .map(|membership| {
                JoinRequestView::assemble(
                    membership,
                    profiles.get(&membership.user_id),
                    counts.get(&membership.user_id),
                    reports_by_target
                        .get(&membership.user_id)
                        .cloned()
                        .unwrap_or_default(),
                )
            })
            .collect();

        Ok(JoinRequestList { requests, warnings })
    }

    /// Move one pending request to approved
    ///
    /// Unknown ids, other communities' requests and already-approved rows all
    /// come back as `JoinRequestNotFound`.
    #[instrument(skip(self))]
    pub async fn approve(
        &self,
        request_id: Snowflake,
        community_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        require_id("community_id", community_id)?;
        require_id("request_id", request_id)?;

        let mut membership = self.find_pending(community_id, request_id).await?;

        let updated = self
            .ctx
            .membership_repo()
            .approve_pending(community_id, request_id)
            .await
            .inspect_err(|e| error!(request_id = %request_id, error = %e, "Approve failed"))?;
        if !updated {
            // Someone else moderated it between the read and the update
            return Err(DomainError::JoinRequestNotFound(request_id).into());
        }

        membership.approve()?;

        info!(
            request_id = %request_id,
            community_id = %community_id,
            user_id = %membership.user_id,
            "Join request approved"
        );

        self.ctx.publish(MembershipEvent::approved(&membership)).await;

        Ok(MembershipResponse::from(&membership))
    }

    /// Delete one pending request
    ///
    /// Reports and point entries about the requester are left untouched.
    #[instrument(skip(self))]
    pub async fn reject(&self, request_id: Snowflake, community_id: Snowflake) -> ServiceResult<()> {
        require_id("community_id", community_id)?;
        require_id("request_id", request_id)?;

        let membership = self.find_pending(community_id, request_id).await?;

        let deleted = self
            .ctx
            .membership_repo()
            .delete_pending(community_id, request_id)
            .await
            .inspect_err(|e| error!(request_id = %request_id, error = %e, "Reject failed"))?;
        if !deleted {
            return Err(DomainError::JoinRequestNotFound(request_id).into());
        }

        info!(
            request_id = %request_id,
            community_id = %community_id,
            user_id = %membership.user_id,
            "Join request rejected"
        );

        self.ctx.publish(MembershipEvent::rejected(&membership)).await;

        Ok(())
    }

    /// Approve every pending request of the community at once
    #[instrument(skip(self))]
    pub async fn approve_all(&self, community_id: Snowflake) -> ServiceResult<BulkModerationResponse> {
        require_id("community_id", community_id)?;

        let approved = self
            .ctx
            .membership_repo()
            .approve_all_pending(community_id)
            .await
            .inspect_err(|e| error!(community_id = %community_id, error = %e, "Bulk approve failed"))?;

        info!(community_id = %community_id, affected = approved.len(), "Pending join requests approved");

        if !approved.is_empty() {
            self.ctx
                .publish(MembershipEvent::bulk_approved(community_id, &approved))
                .await;
        }

        Ok(BulkModerationResponse {
            affected: approved.len() as u64,
        })
    }

    /// Delete every pending request of the community at once
    #[instrument(skip(self))]
    pub async fn reject_all(&self, community_id: Snowflake) -> ServiceResult<BulkModerationResponse> {
        require_id("community_id", community_id)?;

        let rejected = self
            .ctx
            .membership_repo()
            .delete_all_pending(community_id)
            .await
            .inspect_err(|e| error!(community_id = %community_id, error = %e, "Bulk reject failed"))?;

        info!(community_id = %community_id, affected = rejected.len(), "Pending join requests rejected");

        if !rejected.is_empty() {
            self.ctx
                .publish(MembershipEvent::bulk_rejected(community_id, &rejected))
                .await;
        }

        Ok(BulkModerationResponse {
            affected: rejected.len() as u64,
        })
    }

    async fn find_pending(
        &self,
        community_id: Snowflake,
        request_id: Snowflake,
    ) -> ServiceResult<Membership> {
        self.ctx
            .membership_repo()
            .find(community_id, request_id)
            .await?
            .filter(Membership::is_pending)
            .ok_or_else(|| DomainError::JoinRequestNotFound(request_id).into())
    }
}

/// Zero marks an id the caller never supplied
pub(crate) fn require_id(field: &str, id: Snowflake) -> ServiceResult<()> {
    if id.is_zero() {
        return Err(ServiceError::validation(format!("{field} is required")));
    }
    Ok(())
}
