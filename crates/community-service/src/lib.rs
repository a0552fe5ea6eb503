//! # community-service
//!
//! Application layer: join-request moderation, membership requests and
//! member reports, plus the DTOs the API serializes.

pub mod dto;
pub mod services;

pub use services::{
    MembershipService, ModerationService, ReportService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
