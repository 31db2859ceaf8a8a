//! Wagerpit Core Library
//!
//! This crate provides the wagered two-party session engine: the packed
//! state representation, the session state machine, the payout logic,
//! and the timeout predicate.

pub mod error;
pub mod moves;
pub mod payout;
pub mod session;
pub mod state;
pub mod timeout;

pub use error::SessionError;
pub use moves::Move;
pub use payout::{Outcome, Transfer};
pub use session::{EngineConfig, MoveReceipt, Resolution, SessionEngine, Termination};
pub use state::{SessionFields, StateWords, Word};
