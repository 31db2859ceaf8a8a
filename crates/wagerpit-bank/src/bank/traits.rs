//! Bank client trait definition.

use crate::identity::Identity;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from bank operations
#[derive(Debug, Error)]
pub enum BankError {
    #[error("insufficient funds: have {available}, need {required}")]
    InsufficientFunds { available: u64, required: u64 },

    #[error("recipient {0} rejected the transfer")]
    Rejected(Identity),

    #[error("bank unreachable: {0}")]
    Unreachable(String),
}

/// Trait for outbound value transfers.
///
/// This trait abstracts the external value-transfer call the payout
/// path depends on. Implementations can be:
/// - MockBank for testing
/// - a real ledger or payment-network client for production
///
/// A transfer either completes or fails synchronously from the caller's
/// point of view; there is no retry or queueing. Callers that treat
/// transfers as best-effort must not assume a failed transfer rolled
/// anything back on the recipient side.
#[async_trait]
pub trait Bank: Send + Sync {
    /// Send `amount` to `to`.
    async fn transfer(&self, to: Identity, amount: u64) -> Result<(), BankError>;

    /// Current balance credited to `id`.
    async fn balance_of(&self, id: Identity) -> Result<u64, BankError>;
}
