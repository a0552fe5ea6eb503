//! Membership entity <-> model mapper

use community_core::entities::{Membership, MembershipRole, MembershipStatus};
use community_core::error::DomainError;
use community_core::value_objects::Snowflake;

use crate::models::MembershipModel;

fn parse_role(raw: &str) -> Result<MembershipRole, DomainError> {
    match raw {
        "member" => Ok(MembershipRole::Member),
        "admin" => Ok(MembershipRole::Admin),
        other => Err(DomainError::InternalError(format!(
            "unknown membership role '{other}'"
        ))),
    }
}

fn parse_status(raw: &str) -> Result<MembershipStatus, DomainError> {
    match raw {
        "pending" => Ok(MembershipStatus::Pending),
        "approved" => Ok(MembershipStatus::Approved),
        "rejected" => Ok(MembershipStatus::Rejected),
        other => Err(DomainError::InternalError(format!(
            "unknown membership status '{other}'"
        ))),
    }
}

/// Rows carry unchecked text columns, so mapping can fail
impl TryFrom<MembershipModel> for Membership {
    type Error = DomainError;

    fn try_from(model: MembershipModel) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: Snowflake::new(model.id),
            community_id: Snowflake::new(model.community_id),
            user_id: Snowflake::new(model.user_id),
            role: parse_role(&model.role)?,
            status: parse_status(&model.status)?,
            joined_at: model.joined_at,
        })
    }
}

pub fn memberships_from_models(models: Vec<MembershipModel>) -> Result<Vec<Membership>, DomainError> {
    models.into_iter().map(Membership::try_from).collect()
}

/// Membership entity reference to values for database insertion
pub struct MembershipInsert {
    pub id: i64,
    pub community_id: i64,
    pub user_id: i64,
    pub role: &'static str,
    pub status: &'static str,
}

impl MembershipInsert {
    pub fn new(membership: &Membership) -> Self {
        Self {
            id: membership.id.into_inner(),
            community_id: membership.community_id.into_inner(),
            user_id: membership.user_id.into_inner(),
            role: membership.role.as_str(),
            status: membership.status.as_str(),
        }
    }
}
