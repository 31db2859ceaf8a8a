//! Packed session state and its encode/decode boundary.
//!
//! The whole session lives in four packed words:
//!
//! | word     | layout                                                        |
//! |----------|---------------------------------------------------------------|
//! | `start`  | bytes 0..8: start marker (LE u64); 0 means "no session"       |
//! | `stake`  | bytes 0..8: stake per move (LE u64); immutable after init     |
//! | `slot_a` | bytes 0..20: player A identity; byte 20: move A code          |
//! | `slot_b` | bytes 0..20: player B identity; byte 20: move B code; byte 21:in-progress flag; byte 22: lock flag; bytes 24..32: session length (LE u64) |
//!
//! Every setter writes only the bytes of its own sub-field; the
//! co-located sub-fields of a shared word are never disturbed. This is
//! the property the session machine depends on, since a stray byte
//! here silently corrupts an unrelated field.

mod words;

pub use words::{Word, WORD_BYTES};

use crate::moves::Move;
use wagerpit_bank::identity::{Identity, IDENTITY_BYTES};

const MARKER_OFFSET: usize = 0;
const STAKE_OFFSET: usize = 0;
const PLAYER_OFFSET: usize = 0;
const MOVE_OFFSET: usize = IDENTITY_BYTES;
const IN_PROGRESS_OFFSET: usize = 21;
const LOCKED_OFFSET: usize = 22;
const SESSION_LENGTH_OFFSET: usize = 24;

/// Which of the two player slots a word operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

/// The decoded view of the packed session state.
///
/// Decoding is total and lossless for any state previously produced by
/// the setters on [`StateWords`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionFields {
    pub start_marker: u64,
    pub stake: u64,
    pub player_a: Identity,
    pub player_b: Identity,
    pub move_a: Option<Move>,
    pub move_b: Option<Move>,
    pub in_progress: bool,
    pub locked: bool,
    pub session_length: u64,
}

/// The four packed words backing the singleton session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateWords {
    start: Word,
    stake: Word,
    slot_a: Word,
    slot_b: Word,
}

impl StateWords {
    /// Initialize the words for an idle engine. `stake` and
    /// `session_length` are written once here and never change again.
    pub fn init(stake: u64, session_length: u64) -> Self {
        let mut stake_word = Word::ZERO;
        stake_word.set_u64(STAKE_OFFSET, stake);

        let mut slot_b = Word::ZERO;
        slot_b.set_u64(SESSION_LENGTH_OFFSET, session_length);

        Self {
            start: Word::ZERO,
            stake: stake_word,
            slot_a: Word::ZERO,
            slot_b,
        }
    }

    fn slot_word(&mut self, slot: Slot) -> &mut Word {
        match slot {
            Slot::A => &mut self.slot_a,
            Slot::B => &mut self.slot_b,
        }
    }

    /// Record the session start marker.
    pub fn set_start_marker(&mut self, marker: u64) {
        self.start.set_u64(MARKER_OFFSET, marker);
    }

    /// Register a player identity in `slot`.
    pub fn set_player(&mut self, slot: Slot, player: Identity) {
        self.slot_word(slot)
            .set_bytes(PLAYER_OFFSET, player.as_bytes());
    }

    /// Record a move in `slot`.
    pub fn set_move(&mut self, slot: Slot, mv: Move) {
        self.slot_word(slot).set_byte(MOVE_OFFSET, mv.code());
    }

    /// Set or clear the in-progress flag.
    pub fn set_in_progress(&mut self, value: bool) {
        self.slot_b.set_byte(IN_PROGRESS_OFFSET, value as u8);
    }

    /// Set or clear the reentrancy lock.
    pub fn set_locked(&mut self, value: bool) {
        self.slot_b.set_byte(LOCKED_OFFSET, value as u8);
    }

    /// Bulk reset at the end of a session: zeroes the start marker,
    /// both players, both moves, the in-progress flag, and the lock.
    /// The stake word and the session-length sub-field are preserved
    /// byte-for-byte.
    pub fn clear_session(&mut self) {
        self.start = Word::ZERO;
        self.slot_a = Word::ZERO;
        self.slot_b.clear_range(0..SESSION_LENGTH_OFFSET);
    }

    /// Decode all four words into named fields.
    pub fn decode(&self) -> SessionFields {
        SessionFields {
            start_marker: self.start.u64_at(MARKER_OFFSET),
            stake: self.stake.u64_at(STAKE_OFFSET),
            player_a: decode_identity(&self.slot_a),
            player_b: decode_identity(&self.slot_b),
            move_a: Move::from_code(self.slot_a.byte_at(MOVE_OFFSET)),
            move_b: Move::from_code(self.slot_b.byte_at(MOVE_OFFSET)),
            in_progress: self.slot_b.byte_at(IN_PROGRESS_OFFSET) != 0,
            locked: self.slot_b.byte_at(LOCKED_OFFSET) != 0,
            session_length: self.slot_b.u64_at(SESSION_LENGTH_OFFSET),
        }
    }

    /// Raw words (for layout tests).
    pub fn raw(&self) -> [&Word; 4] {
        [&self.start, &self.stake, &self.slot_a, &self.slot_b]
    }
}

fn decode_identity(word: &Word) -> Identity {
    let mut bytes = [0u8; IDENTITY_BYTES];
    bytes.copy_from_slice(word.bytes_at(PLAYER_OFFSET..PLAYER_OFFSET + IDENTITY_BYTES));
    Identity::from_bytes(bytes)
}
