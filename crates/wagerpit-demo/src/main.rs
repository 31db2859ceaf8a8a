//! Wagerpit Demo
//!
//! Runs two scripted sessions against the mock bank: a decisive game
//! that resolves on the second move, and an abandoned game that is
//! force-terminated after the deadline.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wagerpit_bank::{Identity, MockBank};
use wagerpit_core::{EngineConfig, MoveReceipt, SessionEngine};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let stake: u64 = std::env::var("STAKE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1_000);
    let session_length: u64 = std::env::var("SESSION_LENGTH")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(20);
    tracing::info!(stake, session_length, "engine configured");

    let bank = Arc::new(MockBank::new());
    let engine = SessionEngine::new(
        EngineConfig {
            stake,
            session_length,
        },
        bank.clone(),
    );

    let alice = Identity::random();
    let bob = Identity::random();

    // Game 1: Rock vs Scissors, resolved on the second move.
    engine.create(alice, bob).expect("no session should be live");
    engine
        .submit_move(alice, 1, stake)
        .await
        .expect("alice's move should be accepted");
    let receipt = engine
        .submit_move(bob, 3, stake)
        .await
        .expect("bob's move should be accepted");
    if let MoveReceipt::Resolved(resolution) = receipt {
        tracing::info!(outcome = %resolution.outcome, pool = resolution.pool, "game 1 resolved");
    }
    tracing::info!(
        alice = bank.balance(alice),
        bob = bank.balance(bob),
        "balances after game 1"
    );

    // Game 2: Bob walks away; a spectator terminates after the deadline.
    engine.create(alice, bob).expect("session should have reset");
    engine
        .submit_move(alice, 2, stake)
        .await
        .expect("alice's move should be accepted");
    engine.advance_height(session_length + 1);
    let termination = engine.terminate().await.expect("deadline has passed");
    tracing::info!(
        pool = termination.pool,
        refunded = termination.refund.is_some(),
        "game 2 terminated"
    );
    tracing::info!(
        alice = bank.balance(alice),
        bob = bank.balance(bob),
        "final balances"
    );
}
