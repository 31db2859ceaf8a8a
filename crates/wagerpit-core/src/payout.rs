//! Payout decision and fund distribution.

use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;
use wagerpit_bank::{Bank, Identity};

/// Outcome of comparing the two submitted moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerAWins,
    PlayerBWins,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerAWins => write!(f, "player A wins"),
            Outcome::PlayerBWins => write!(f, "player B wins"),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// Decide the outcome from the two moves under cyclic dominance.
pub fn outcome(move_a: Move, move_b: Move) -> Outcome {
    if move_a == move_b {
        Outcome::Tie
    } else if move_a.beats(&move_b) {
        Outcome::PlayerAWins
    } else {
        Outcome::PlayerBWins
    }
}

/// Split the pooled balance according to the outcome.
///
/// A tie sends `pool / 2` to player A and the entire remaining balance
/// to player B, so the remainder of the integer division is never
/// lost. A win sends the whole pool to the winner. The returned
/// amounts always sum to `pool`.
pub fn allocations(
    outcome: Outcome,
    player_a: Identity,
    player_b: Identity,
    pool: u64,
) -> Vec<(Identity, u64)> {
    match outcome {
        Outcome::Tie => {
            let half = pool / 2;
            vec![(player_a, half), (player_b, pool - half)]
        }
        Outcome::PlayerAWins => vec![(player_a, pool)],
        Outcome::PlayerBWins => vec![(player_b, pool)],
    }
}

/// One attempted payout transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub to: Identity,
    pub amount: u64,
    /// False when the external transfer call failed. A failed transfer
    /// never blocks resolution; the recipient simply does not receive
    /// the funds.
    pub delivered: bool,
}

/// Perform the allocated transfers best-effort.
///
/// Failures are logged and reported per transfer, never escalated:
/// stranding the whole session on a hostile recipient's refusal would
/// be worse than that recipient forfeiting delivery.
pub async fn distribute(bank: &dyn Bank, allocations: &[(Identity, u64)]) -> Vec<Transfer> {
    let mut transfers = Vec::with_capacity(allocations.len());
    for &(to, amount) in allocations {
        let delivered = match bank.transfer(to, amount).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%to, amount, %err, "payout transfer failed");
                false
            }
        };
        transfers.push(Transfer {
            to,
            amount,
            delivered,
        });
    }
    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use wagerpit_bank::MockBank;

    #[test]
    fn test_outcome_all_win_combinations() {
        assert_eq!(outcome(Move::Rock, Move::Scissors), Outcome::PlayerAWins);
        assert_eq!(outcome(Move::Paper, Move::Rock), Outcome::PlayerAWins);
        assert_eq!(outcome(Move::Scissors, Move::Paper), Outcome::PlayerAWins);

        assert_eq!(outcome(Move::Scissors, Move::Rock), Outcome::PlayerBWins);
        assert_eq!(outcome(Move::Rock, Move::Paper), Outcome::PlayerBWins);
        assert_eq!(outcome(Move::Paper, Move::Scissors), Outcome::PlayerBWins);
    }

    #[test]
    fn test_outcome_ties() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(outcome(mv, mv), Outcome::Tie);
        }
    }

    #[test]
    fn test_tie_split_conserves_odd_pool() {
        let a = Identity::random();
        let b = Identity::random();

        let allocs = allocations(Outcome::Tie, a, b, 2_001);
        assert_eq!(allocs, vec![(a, 1_000), (b, 1_001)]);
        assert_eq!(allocs.iter().map(|(_, amt)| amt).sum::<u64>(), 2_001);
    }

    #[test]
    fn test_win_takes_whole_pool() {
        let a = Identity::random();
        let b = Identity::random();

        assert_eq!(allocations(Outcome::PlayerAWins, a, b, 2_000), vec![(a, 2_000)]);
        assert_eq!(allocations(Outcome::PlayerBWins, a, b, 2_000), vec![(b, 2_000)]);
    }

    #[tokio::test]
    async fn test_distribute_credits_recipients() {
        let bank = MockBank::new();
        let a = Identity::random();
        let b = Identity::random();

        let transfers = distribute(&bank, &[(a, 700), (b, 300)]).await;
        assert!(transfers.iter().all(|t| t.delivered));
        assert_eq!(bank.balance(a), 700);
        assert_eq!(bank.balance(b), 300);
    }

    #[tokio::test]
    async fn test_distribute_continues_past_rejection() {
        let bank = MockBank::new();
        let hostile = Identity::random();
        let honest = Identity::random();
        bank.reject_transfers_to(hostile);

        let transfers = distribute(&bank, &[(hostile, 500), (honest, 500)]).await;
        assert!(!transfers[0].delivered);
        assert!(transfers[1].delivered);
        assert_eq!(bank.balance(hostile), 0);
        assert_eq!(bank.balance(honest), 500);
    }
}
