//! Session error taxonomy.

use thiserror::Error;

/// Errors from session operations.
///
/// Every variant aborts the current call with no partial state change;
/// none is retried automatically.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("operation not valid in the current session state")]
    InvalidState,

    #[error("caller is not a registered player with a pending move")]
    Unauthorized,

    #[error("deposit {deposit} is below the required stake {stake}")]
    InsufficientPayment { deposit: u64, stake: u64 },

    #[error("move code {0} is outside the valid range 1-3")]
    InvalidMove(u8),

    #[error("session is busy resolving another call")]
    Reentrant,

    #[error("session deadline has not passed yet")]
    TooEarly,
}
