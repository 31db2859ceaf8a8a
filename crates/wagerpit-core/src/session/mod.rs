//! The session state machine.
//!
//! A [`SessionEngine`] owns the singleton session: `Idle` →
//! `AwaitingMoves` → `Resolving` → `Idle`. It is a clonable handle over
//! shared inner state; every entry point takes one consistent snapshot
//! of the decoded fields under the inner mutex, validates, mutates, and
//! releases the mutex **before** any external transfer runs. The
//! reentrancy defense is therefore the `locked` bit in the packed
//! state, not the mutex: a transfer callback that re-enters the engine
//! acquires the mutex normally, observes the lock, and fails with
//! [`SessionError::Reentrant`] instead of deadlocking.

use crate::error::SessionError;
use crate::moves::Move;
use crate::payout::{self, Outcome, Transfer};
use crate::state::{SessionFields, Slot, StateWords};
use crate::timeout;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use wagerpit_bank::{Bank, Identity};

/// Immutable engine configuration, set once at construction.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deposit required per move submission.
    pub stake: u64,
    /// Maximum session duration, in the same units as the engine clock.
    pub session_length: u64,
}

/// Result of a successful `submit_move`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveReceipt {
    /// Move recorded; waiting for the opponent.
    Awaiting,
    /// This was the second move: the session resolved and reset within
    /// the same call.
    Resolved(Resolution),
}

/// A completed evaluation of both moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Pooled balance drained by this resolution.
    pub pool: u64,
    pub transfers: Vec<Transfer>,
}

/// A completed forced termination.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Termination {
    /// Pooled balance drained by this termination.
    pub pool: u64,
    /// The refund to the single player who had moved, if any.
    pub refund: Option<Transfer>,
}

struct Store {
    words: StateWords,
    /// Funds currently held: exactly stake x moves submitted.
    pool: u64,
    /// Monotonic clock (e.g. block height), advanced externally.
    height: u64,
}

/// The wagered session engine.
#[derive(Clone)]
pub struct SessionEngine {
    inner: Arc<Mutex<Store>>,
    bank: Arc<dyn Bank>,
}

/// Work staged under the mutex, executed after it is released.
struct StagedResolution {
    move_a: Move,
    move_b: Move,
    player_a: Identity,
    player_b: Identity,
    pool: u64,
}

impl SessionEngine {
    /// Create an idle engine. `config` is immutable from here on.
    pub fn new(config: EngineConfig, bank: Arc<dyn Bank>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Store {
                words: StateWords::init(config.stake, config.session_length),
                pool: 0,
                height: 0,
            })),
            bank,
        }
    }

    /// Current clock value.
    pub fn height(&self) -> u64 {
        self.inner.lock().unwrap().height
    }

    /// Advance the clock by `blocks`.
    pub fn advance_height(&self, blocks: u64) {
        let mut store = self.inner.lock().unwrap();
        store.height = store.height.saturating_add(blocks);
    }

    /// Funds currently held by the engine.
    pub fn pool(&self) -> u64 {
        self.inner.lock().unwrap().pool
    }

    /// Read-only snapshot of the decoded session state.
    pub fn fields(&self) -> SessionFields {
        self.inner.lock().unwrap().words.decode()
    }

    /// Open a session for the two given players.
    ///
    /// Records the current height as the start marker and flags the
    /// session in progress. Moves and the lock are untouched; they are
    /// already at their sentinels from the previous reset. No funds
    /// move.
    pub fn create(&self, player_a: Identity, player_b: Identity) -> Result<(), SessionError> {
        let mut store = self.inner.lock().unwrap();
        let fields = store.words.decode();
        if fields.locked {
            return Err(SessionError::Reentrant);
        }
        if fields.in_progress {
            return Err(SessionError::InvalidState);
        }

        let start_marker = store.height;
        store.words.set_start_marker(start_marker);
        store.words.set_player(Slot::A, player_a);
        store.words.set_player(Slot::B, player_b);
        store.words.set_in_progress(true);

        tracing::info!(%player_a, %player_b, start_marker, "session created");
        Ok(())
    }

    /// Submit a move with an attached deposit.
    ///
    /// The caller must match a registered slot whose move is still
    /// unset. Exactly `stake` joins the pool; any surplus is returned
    /// to the caller best-effort after all state changes. When this is
    /// the second move, evaluation and reset happen atomically within
    /// this call, behind the reentrancy lock.
    pub async fn submit_move(
        &self,
        caller: Identity,
        code: u8,
        deposit: u64,
    ) -> Result<MoveReceipt, SessionError> {
        // Validate and mutate against a single snapshot, then release
        // the mutex before any transfer runs.
        let (staged, surplus, mv) = {
            let mut store = self.inner.lock().unwrap();
            let fields = store.words.decode();
            if fields.locked {
                return Err(SessionError::Reentrant);
            }
            if !fields.in_progress {
                return Err(SessionError::InvalidState);
            }
            if deposit < fields.stake {
                return Err(SessionError::InsufficientPayment {
                    deposit,
                    stake: fields.stake,
                });
            }
            let mv = Move::from_code(code).ok_or(SessionError::InvalidMove(code))?;

            let slot = if caller == fields.player_a && fields.move_a.is_none() {
                Slot::A
            } else if caller == fields.player_b && fields.move_b.is_none() {
                Slot::B
            } else {
                return Err(SessionError::Unauthorized);
            };

            store.words.set_move(slot, mv);
            store.pool += fields.stake;

            let other_move = match slot {
                Slot::A => fields.move_b,
                Slot::B => fields.move_a,
            };
            let staged = other_move.map(|other| {
                // Second move is in: take the lock for the whole
                // evaluate-and-reset sequence.
                store.words.set_locked(true);
                let (move_a, move_b) = match slot {
                    Slot::A => (mv, other),
                    Slot::B => (other, mv),
                };
                StagedResolution {
                    move_a,
                    move_b,
                    player_a: fields.player_a,
                    player_b: fields.player_b,
                    pool: store.pool,
                }
            });
            (staged, deposit - fields.stake, mv)
        };

        let receipt = match staged {
            Some(staged) => {
                let resolution = self.resolve(staged).await;
                MoveReceipt::Resolved(resolution)
            }
            None => {
                tracing::info!(player = %caller, %mv, "move recorded, awaiting opponent");
                MoveReceipt::Awaiting
            }
        };

        if surplus > 0 {
            if let Err(err) = self.bank.transfer(caller, surplus).await {
                tracing::warn!(%caller, surplus, %err, "surplus refund failed");
            }
        }

        Ok(receipt)
    }

    /// Evaluate both moves, drain the pool, and reset the session.
    /// Runs with the reentrancy lock held; the bulk clear at the end
    /// releases it.
    async fn resolve(&self, staged: StagedResolution) -> Resolution {
        let outcome = payout::outcome(staged.move_a, staged.move_b);
        let allocations =
            payout::allocations(outcome, staged.player_a, staged.player_b, staged.pool);
        let transfers = payout::distribute(self.bank.as_ref(), &allocations).await;

        self.reset();

        tracing::info!(%outcome, pool = staged.pool, "session resolved");
        Resolution {
            outcome,
            pool: staged.pool,
            transfers,
        }
    }

    /// Force-terminate a session past its deadline.
    ///
    /// Spectator-triggered: any caller may invoke this once
    /// `now > start_marker + session_length`. Pays the whole pool to
    /// whichever single player has a recorded move, regardless of
    /// slot; pays nobody when neither moved. The session resets in all
    /// cases.
    pub async fn terminate(&self) -> Result<Termination, SessionError> {
        let (beneficiary, pool) = {
            let mut store = self.inner.lock().unwrap();
            let fields = store.words.decode();
            if fields.locked {
                return Err(SessionError::Reentrant);
            }
            if !fields.in_progress {
                return Err(SessionError::InvalidState);
            }
            if !timeout::expired(fields.start_marker, fields.session_length, store.height) {
                return Err(SessionError::TooEarly);
            }

            store.words.set_locked(true);
            // Both-moved cannot be observed here: submit_move resolves
            // the session in the same call that records the second
            // move.
            let beneficiary = match (fields.move_a, fields.move_b) {
                (Some(_), None) => Some(fields.player_a),
                (None, Some(_)) => Some(fields.player_b),
                _ => None,
            };
            (beneficiary, store.pool)
        };

        let refund = match beneficiary {
            Some(to) if pool > 0 => payout::distribute(self.bank.as_ref(), &[(to, pool)])
                .await
                .into_iter()
                .next(),
            _ => None,
        };

        self.reset();

        tracing::info!(pool, refunded = refund.is_some(), "session terminated");
        Ok(Termination { pool, refund })
    }

    /// Bulk reset to the idle state. Clears players, moves, the start
    /// marker, the in-progress flag, and the lock; stake and session
    /// length survive. Zeroes the pool.
    fn reset(&self) {
        let mut store = self.inner.lock().unwrap();
        store.words.clear_session();
        store.pool = 0;
    }
}
