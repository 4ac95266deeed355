//! The round and turn engine.
//!
//! `Game` owns the board, the dice, the divers and the air counter. Callers
//! drive it one step at a time:
//!
//! ```text
//! start ─▶ begin_turn ─▶ perform_action ─▶ advance_to_next_diver ─┐
//!              ▲                                                  │
//!              └──────────────────────────────────────────────────┘
//!          (round over) end_round ─▶ next_round ─▶ Playing | GameEnd
//! ```
//!
//! Every operation checks its preconditions before mutating anything, so
//! an `Err` leaves the game exactly as it was.

pub mod engine;
pub mod turn;
pub mod round;
pub mod snapshot;
pub mod autoplay;

use serde::{Deserialize, Serialize};

use crate::core::DiverId;

pub use engine::{Game, GameBuilder};
pub use turn::{TurnStage, TurnSummary};
pub use round::{RoundEndReason, RoundReport};
pub use snapshot::{DiverSummary, GameSnapshot, SpaceSummary};
pub use autoplay::TurnOutcome;

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Built but not started.
    #[default]
    Setup,
    /// Turns are being taken.
    Playing,
    /// Round scored; waiting for `next_round`.
    RoundEnd,
    /// All rounds played.
    GameEnd,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(DiverId),
    /// Several divers tied on the top score.
    Winners(Vec<DiverId>),
}

impl GameResult {
    /// Build from the list of top scorers.
    #[must_use]
    pub fn from_winners(mut winners: Vec<DiverId>) -> Self {
        if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        }
    }

    /// Check if a diver won.
    #[must_use]
    pub fn is_winner(&self, diver: DiverId) -> bool {
        match self {
            GameResult::Winner(d) => *d == diver,
            GameResult::Winners(ds) => ds.contains(&diver),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::from_winners(vec![DiverId::new(1)]);
        assert_eq!(result, GameResult::Winner(DiverId::new(1)));
        assert!(!result.is_winner(DiverId::new(0)));
        assert!(result.is_winner(DiverId::new(1)));

        let tie = GameResult::from_winners(vec![DiverId::new(0), DiverId::new(2)]);
        assert!(tie.is_winner(DiverId::new(0)));
        assert!(!tie.is_winner(DiverId::new(1)));
        assert!(tie.is_winner(DiverId::new(2)));
    }

    #[test]
    fn test_default_phase() {
        assert_eq!(Phase::default(), Phase::Setup);
    }
}
