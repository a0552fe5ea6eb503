//! Integration test utilities for the moderation service
//!
//! In-memory stores, a seeded [`TestWorld`](fixtures::TestWorld) and an HTTP
//! [`TestServer`](helpers::TestServer) for end-to-end tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
pub use memory::*;
