//! Wagerpit Bank Library
//!
//! This crate provides the shared value-transfer primitives for the
//! wagered session engine: participant identities, the bank client
//! trait, and an in-memory mock bank for testing.

pub mod bank;
pub mod identity;

pub use bank::{Bank, BankError, MockBank};
pub use identity::Identity;
