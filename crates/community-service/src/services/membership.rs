//! Membership service
//!
//! The member-facing side: asking to join, checking one's own membership and
//! listing who is in a community.

use std::collections::HashMap;

use community_core::entities::Membership;
use community_core::{DomainError, MembershipEvent, MembershipStatus, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{MemberResponse, MembershipResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::moderation::require_id;

/// Page size used when the caller gives none
pub const DEFAULT_MEMBER_PAGE: i64 = 50;
/// Largest page a caller may ask for
pub const MAX_MEMBER_PAGE: i64 = 100;

/// Membership service
pub struct MembershipService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MembershipService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// File a pending join request for the user
    #[instrument(skip(self))]
    pub async fn request_to_join(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        require_id("community_id", community_id)?;
        require_id("user_id", user_id)?;

        if let Some(existing) = self
            .ctx
            .membership_repo()
            .find_by_user(community_id, user_id)
            .await?
        {
            return Err(match existing.status {
                MembershipStatus::Approved => DomainError::AlreadyMember,
                _ => DomainError::JoinRequestAlreadyPending,
            }
            .into());
        }

        let membership = Membership::request(self.ctx.generate_id(), community_id, user_id);
        // A concurrent request loses on the live-membership unique index
        self.ctx.membership_repo().create(&membership).await?;

        info!(
            request_id = %membership.id,
            community_id = %community_id,
            user_id = %user_id,
            "Join request created"
        );

        self.ctx
            .publish(MembershipEvent::join_requested(&membership))
            .await;

        Ok(MembershipResponse::from(&membership))
    }

    /// The user's live membership of the community
    #[instrument(skip(self))]
    pub async fn get_membership(
        &self,
        community_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MembershipResponse> {
        require_id("community_id", community_id)?;

        let membership = self
            .ctx
            .membership_repo()
            .find_by_user(community_id, user_id)
            .await?
            .ok_or(DomainError::MembershipNotFound)?;

        Ok(MembershipResponse::from(membership))
    }

    /// Approved members ordered by user id
    ///
    /// `limit` is clamped to `1..=MAX_MEMBER_PAGE`. Members whose profile can't be
    /// loaded are still listed under a placeholder name.
    #[instrument(skip(self))]
    pub async fn list_members(
        &self,
        community_id: Snowflake,
        limit: Option<i64>,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<MemberResponse>> {
        require_id("community_id", community_id)?;

        let limit = limit.unwrap_or(DEFAULT_MEMBER_PAGE).clamp(1, MAX_MEMBER_PAGE);
        let members = self
            .ctx
            .membership_repo()
            .find_approved(community_id, limit, after)
            .await?;

        let user_ids: Vec<Snowflake> = members.iter().map(|m| m.user_id).collect();
        let profiles: HashMap<_, _> = match self.ctx.user_repo().find_by_ids(&user_ids).await {
            Ok(profiles) => profiles.into_iter().map(|p| (p.id, p)).collect(),
            Err(e) => {
                warn!(community_id = %community_id, error = %e, "Member profiles unavailable");
                HashMap::new()
            }
        };

        Ok(members
            .iter()
            .map(|m| MemberResponse::assemble(m, profiles.get(&m.user_id)))
            .collect())
    }
}
