//! Whole-turn drivers built on the step-by-step API.
//!
//! Each call runs one complete turn: begin, act, then either pass to the
//! next diver or close the round and open the next one.

use log::debug;

use super::engine::Game;
use super::round::RoundReport;
use super::turn::TurnSummary;
use super::{GameResult, Phase};
use crate::board::{Space, Tile};
use crate::core::{EngineResult, StateViolation};
use crate::divers::TileAction;

/// Everything a full turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub summary: TurnSummary,
    /// Action requested; `TileAction::None` when none was possible.
    pub action: TileAction,
    /// Tile picked up or dropped.
    pub tile: Option<Tile>,
    /// Present when this turn ended the round.
    pub round_report: Option<RoundReport>,
}

impl Game {
    /// Play the current diver's turn with caller-supplied decisions.
    ///
    /// `choose_action` is only consulted when an action is possible.
    pub fn play_turn<F>(&mut self, wants_to_go_back: bool, choose_action: F) -> EngineResult<TurnOutcome>
    where
        F: FnOnce(&TurnSummary, &Space) -> TileAction,
    {
        self.run_turn(wants_to_go_back, |game, summary| {
            game.board
                .get_space(summary.end_position)
                .map(|space| choose_action(summary, space))
                .unwrap_or_default()
        })
    }

    /// Play the current diver's turn using its own policy.
    ///
    /// Fails with `DecisionRequired` for a human diver. A diver parked on
    /// the deepest space turns back, since it cannot descend any further.
    pub fn play_automated_turn(&mut self) -> EngineResult<TurnOutcome> {
        self.require_phase(Phase::Playing)?;
        let id = self.current;
        let diver = self.diver(id)?;
        if !diver.is_automated() {
            return Err(StateViolation::DecisionRequired(id).into());
        }
        let at_bottom = diver.position() == self.board.last_index();
        let wants_to_go_back = !diver.is_at_start()
            && (at_bottom || diver.choose_direction(self.air).unwrap_or(false));

        self.run_turn(wants_to_go_back, |game, summary| {
            let diver = &game.divers[summary.diver];
            game.board
                .get_space(summary.end_position)
                .ok()
                .and_then(|space| diver.choose_action(space, game.air))
                .unwrap_or_default()
        })
    }

    /// Start if needed and play every remaining turn automatically.
    ///
    /// Every diver must be automated.
    pub fn play_out(&mut self) -> EngineResult<GameResult> {
        if self.phase == Phase::Setup {
            self.start()?;
        }
        if self.phase == Phase::RoundEnd {
            self.next_round()?;
        }
        while self.phase == Phase::Playing {
            self.play_automated_turn()?;
        }
        Ok(GameResult::from_winners(self.winners()))
    }

    fn run_turn<F>(&mut self, wants_to_go_back: bool, choose_action: F) -> EngineResult<TurnOutcome>
    where
        F: FnOnce(&Game, &TurnSummary) -> TileAction,
    {
        let id = self.current;
        let summary = self.begin_turn(id, wants_to_go_back)?;

        let action = if summary.can_act {
            choose_action(self, &summary)
        } else {
            TileAction::None
        };
        let tile = self.perform_action(id, action)?;

        let round_report = if self.is_round_over() {
            let report = self.end_round()?;
            self.next_round()?;
            Some(report)
        } else {
            self.advance_to_next_diver()?;
            None
        };

        debug!("{id} finished turn with {action:?}");
        Ok(TurnOutcome {
            summary,
            action,
            tile,
            round_report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiverId, EngineError, GameConfig};
    use crate::divers::{Diver, Policy};
    use crate::rules::{GameBuilder, RoundEndReason};

    fn bots(seed: u64) -> Game {
        GameBuilder::new()
            .diver(Diver::new("Steady", Policy::balanced()))
            .diver(Diver::new("Careful", Policy::cautious()))
            .diver(Diver::new("Bold", Policy::adventurous()))
            .config(GameConfig::default().with_seed(seed))
            .build()
            .unwrap()
    }

    #[test]
    fn test_play_out_finishes() {
        let mut game = bots(42);
        let result = game.play_out().unwrap();

        assert!(game.is_game_over());
        assert_eq!(game.round_number(), 4);
        assert_eq!(Some(result), game.result());
    }

    #[test]
    fn test_play_out_is_deterministic() {
        let mut a = bots(9);
        let mut b = bots(9);
        a.play_out().unwrap();
        b.play_out().unwrap();
        assert_eq!(a.scores(), b.scores());
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_human_needs_decisions() {
        let mut game = GameBuilder::new()
            .divers([Diver::human("Ana"), Diver::new("Bot", Policy::balanced())])
            .build()
            .unwrap();
        game.start().unwrap();

        // Humans are driven through `play_turn`.
        let err = game.play_automated_turn().unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidState(StateViolation::DecisionRequired(_))
        ));
        assert_eq!(game.current_diver(), DiverId::new(0));
    }

    #[test]
    fn test_play_turn_with_callback() {
        let mut game = GameBuilder::new()
            .divers([Diver::human("Ana"), Diver::human("Ben")])
            .build()
            .unwrap();
        game.start().unwrap();

        let outcome = game
            .play_turn(false, |summary, space| {
                assert!(summary.can_act);
                assert!(space.has_tiles());
                TileAction::Pickup
            })
            .unwrap();

        assert!(outcome.tile.is_some());
        assert_eq!(outcome.action, TileAction::Pickup);
        assert!(outcome.round_report.is_none());
        assert_eq!(game.current_diver(), DiverId::new(1));
    }

    #[test]
    fn test_round_report_on_last_turn() {
        let mut game = GameBuilder::new()
            .divers([Diver::human("Ana"), Diver::human("Ben")])
            .config(GameConfig::default().with_air(1))
            .build()
            .unwrap();
        game.start().unwrap();

        game.play_turn(false, |_, _| TileAction::Pickup).unwrap();
        game.play_turn(false, |_, _| TileAction::None).unwrap();
        // Ana now pays one air for her tile and the round ends.
        let outcome = game.play_turn(false, |_, _| TileAction::None).unwrap();

        let report = outcome.round_report.unwrap();
        assert_eq!(report.reason, RoundEndReason::AirExhausted);
        assert_eq!(report.sunk.len(), 1);
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.phase(), Phase::Playing);
    }
}
