//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod health;
pub mod join_requests;
pub mod memberships;
pub mod reports;
