//! Mock bank for testing.

use super::traits::{Bank, BankError};
use crate::identity::Identity;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory mock bank for testing.
///
/// Tracks a balance per identity. Recipients can be marked as rejecting
/// so tests can exercise the best-effort transfer path.
#[derive(Clone, Default)]
pub struct MockBank {
    /// Map of identity -> credited balance
    balances: Arc<Mutex<HashMap<Identity, u64>>>,
    /// Recipients that refuse incoming transfers
    rejecting: Arc<Mutex<HashSet<Identity>>>,
}

impl MockBank {
    /// Create a new mock bank with no balances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `id` directly (test setup).
    pub fn credit(&self, id: Identity, amount: u64) {
        let mut balances = self.balances.lock().unwrap();
        let entry = balances.entry(id).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Current balance of `id` without going through the trait.
    pub fn balance(&self, id: Identity) -> u64 {
        self.balances.lock().unwrap().get(&id).copied().unwrap_or(0)
    }

    /// Mark `id` as rejecting all incoming transfers.
    pub fn reject_transfers_to(&self, id: Identity) {
        self.rejecting.lock().unwrap().insert(id);
    }

    /// Total of all credited balances (for conservation checks).
    pub fn total(&self) -> u64 {
        self.balances.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Bank for MockBank {
    async fn transfer(&self, to: Identity, amount: u64) -> Result<(), BankError> {
        if self.rejecting.lock().unwrap().contains(&to) {
            return Err(BankError::Rejected(to));
        }

        let mut balances = self.balances.lock().unwrap();
        let entry = balances.entry(to).or_insert(0);
        *entry = entry.saturating_add(amount);
        Ok(())
    }

    async fn balance_of(&self, id: Identity) -> Result<u64, BankError> {
        Ok(self.balance(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_transfer_credits_recipient() {
        let bank = MockBank::new();
        let alice = Identity::random();

        bank.transfer(alice, 500).await.unwrap();
        assert_eq!(bank.balance(alice), 500);

        bank.transfer(alice, 250).await.unwrap();
        assert_eq!(bank.balance_of(alice).await.unwrap(), 750);
    }

    #[tokio::test]
    async fn test_rejecting_recipient_fails() {
        let bank = MockBank::new();
        let hostile = Identity::random();
        bank.reject_transfers_to(hostile);

        let result = bank.transfer(hostile, 100).await;
        assert!(matches!(result, Err(BankError::Rejected(id)) if id == hostile));
        assert_eq!(bank.balance(hostile), 0);
    }

    #[tokio::test]
    async fn test_total_sums_all_balances() {
        let bank = MockBank::new();
        let a = Identity::random();
        let b = Identity::random();

        bank.credit(a, 300);
        bank.transfer(b, 200).await.unwrap();
        assert_eq!(bank.total(), 500);
    }
}
