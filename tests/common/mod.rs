//! Integration test common infrastructure.
//!
//! Provides an in-memory platform, canned identities and message events,
//! and router construction helpers.

pub mod fixtures;
pub mod platform;

#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use platform::{MockPlatform, Reaction, Sent};
