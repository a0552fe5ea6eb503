//! Domain events emitted by the membership workflow

mod membership_event;

pub use membership_event::{
    BulkModeratedEvent, JoinRequestEvent, MemberReportedEvent, MembershipEvent,
};
