//! Move codes and the cyclic-dominance rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted move.
///
/// Wire codes are 1-3; code 0 is the "unset" sentinel in packed storage
/// and never decodes to a `Move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    /// Decode a wire code. Returns `None` for 0 (unset) and anything
    /// outside 1-3.
    pub fn from_code(code: u8) -> Option<Move> {
        match code {
            1 => Some(Move::Rock),
            2 => Some(Move::Paper),
            3 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// The wire code for this move.
    pub fn code(&self) -> u8 {
        match self {
            Move::Rock => 1,
            Move::Paper => 2,
            Move::Scissors => 3,
        }
    }

    /// Check if this move beats the other under cyclic dominance:
    /// Rock beats Scissors, Paper beats Rock, Scissors beats Paper.
    pub fn beats(&self, other: &Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors)
                | (Move::Paper, Move::Rock)
                | (Move::Scissors, Move::Paper)
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Rock => write!(f, "Rock"),
            Move::Paper => write!(f, "Paper"),
            Move::Scissors => write!(f, "Scissors"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert_eq!(Move::from_code(mv.code()), Some(mv));
        }
    }

    #[test]
    fn test_invalid_codes_decode_to_none() {
        assert_eq!(Move::from_code(0), None);
        assert_eq!(Move::from_code(4), None);
        assert_eq!(Move::from_code(255), None);
    }

    #[test]
    fn test_cyclic_dominance() {
        assert!(Move::Rock.beats(&Move::Scissors));
        assert!(Move::Paper.beats(&Move::Rock));
        assert!(Move::Scissors.beats(&Move::Paper));

        assert!(!Move::Scissors.beats(&Move::Rock));
        assert!(!Move::Rock.beats(&Move::Paper));
        assert!(!Move::Paper.beats(&Move::Scissors));
    }

    #[test]
    fn test_no_move_beats_itself() {
        for mv in [Move::Rock, Move::Paper, Move::Scissors] {
            assert!(!mv.beats(&mv));
        }
    }
}
