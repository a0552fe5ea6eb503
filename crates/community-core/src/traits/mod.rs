//! Ports implemented by the infrastructure crates

mod notifier;
mod repositories;

pub use notifier::MembershipNotifier;
pub use repositories::{
    MembershipRepository, PointLedgerRepository, RepoResult, ReportRepository, UserRepository,
};
