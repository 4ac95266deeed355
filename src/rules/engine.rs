//! The `Game` aggregate, its builder and the read-only queries.
//!
//! Turn resolution lives in `turn.rs`, round scoring in `round.rs`. Both
//! are further `impl Game` blocks over the fields defined here.

use log::info;

use super::turn::TurnStage;
use super::{GameResult, Phase};
use crate::board::Board;
use crate::core::{
    Dice, DiverId, DiverMap, EngineResult, GameConfig, GameRng, StateViolation,
};
use crate::divers::Diver;

/// An in-progress game.
///
/// Owns every piece of mutable state. Callers only ever see borrowed views
/// or snapshots.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) config: GameConfig,
    /// Board as dealt, kept so `new_game` can deal the same path again.
    pub(crate) initial_board: Board,
    pub(crate) board: Board,
    pub(crate) dice: Dice,
    pub(crate) divers: DiverMap<Diver>,
    pub(crate) round_number: u32,
    pub(crate) air: i32,
    pub(crate) current: DiverId,
    pub(crate) phase: Phase,
    pub(crate) stage: TurnStage,
    /// Divers in the order they reached the start this round.
    pub(crate) return_order: Vec<DiverId>,
    /// Who opens the next round, decided by `end_round`.
    pub(crate) next_starter: Option<DiverId>,
}

/// Builder for creating a `Game`.
///
/// ```
/// use deep_sea::divers::{Diver, Policy};
/// use deep_sea::rules::{GameBuilder, Phase};
///
/// let game = GameBuilder::new()
///     .diver(Diver::human("Ana"))
///     .diver(Diver::new("Bot", Policy::balanced()))
///     .build()
///     .unwrap();
/// assert_eq!(game.phase(), Phase::Setup);
/// assert_eq!(game.air_remaining(), 25);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    divers: Vec<Diver>,
    config: GameConfig,
    board: Option<Board>,
    dice: Option<Dice>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diver. Seats follow insertion order.
    #[must_use]
    pub fn diver(mut self, diver: Diver) -> Self {
        self.divers.push(diver);
        self
    }

    /// Add several divers.
    #[must_use]
    pub fn divers(mut self, divers: impl IntoIterator<Item = Diver>) -> Self {
        self.divers.extend(divers);
        self
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this board instead of dealing one.
    #[must_use]
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Use these dice instead of seeding them from the config.
    #[must_use]
    pub fn dice(mut self, dice: Dice) -> Self {
        self.dice = Some(dice);
        self
    }

    /// Validate and assemble the game. It starts in `Phase::Setup`.
    pub fn build(self) -> EngineResult<Game> {
        let config = self.config;
        config.validate(self.divers.len())?;

        let master = GameRng::new(config.seed);
        let board = match self.board {
            Some(board) => {
                board.check()?;
                board
            }
            None if config.board.rng_seed.is_some() => Board::create_default(&config.board)?,
            None => Board::create_default_with_rng(&config.board, &mut master.for_context("board"))?,
        };
        let dice = match self.dice {
            Some(dice) => dice,
            None => Dice::new(config.dice, master.for_context("dice"))?,
        };

        let air = config.air_per_round;
        Ok(Game {
            config,
            initial_board: board.clone(),
            board,
            dice,
            divers: DiverMap::from(self.divers),
            round_number: 1,
            air,
            current: DiverId::new(0),
            phase: Phase::Setup,
            stage: TurnStage::default(),
            return_order: Vec::new(),
            next_starter: None,
        })
    }
}

impl Game {
    /// Shorthand for `GameBuilder::new()`.
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    /// Leave setup and open round 1.
    pub fn start(&mut self) -> EngineResult<()> {
        self.require_phase(Phase::Setup)?;
        self.phase = Phase::Playing;
        info!(
            "game started: {} divers, {} rounds, {} air, board of {} spaces",
            self.divers.len(),
            self.config.total_rounds,
            self.config.air_per_round,
            self.board.len()
        );
        Ok(())
    }

    /// Reset to setup with the original board, forgetting all banked
    /// treasure. The dice keep rolling from where they are.
    pub fn new_game(&mut self) {
        self.board = self.initial_board.clone();
        for diver in self.divers.values_mut() {
            diver.reset_for_game();
        }
        self.round_number = 1;
        self.air = self.config.air_per_round;
        self.current = DiverId::new(0);
        self.phase = Phase::Setup;
        self.stage = TurnStage::default();
        self.return_order.clear();
        self.next_starter = None;
        info!("game reset");
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 1-based. Exceeds `total_rounds` once the game has ended.
    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn total_rounds(&self) -> u32 {
        self.config.total_rounds
    }

    /// May be negative after a heavy diver's turn.
    #[must_use]
    pub fn air_remaining(&self) -> i32 {
        self.air
    }

    #[must_use]
    pub fn diver_count(&self) -> usize {
        self.divers.len()
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_diver(&self) -> DiverId {
        self.current
    }

    #[must_use]
    pub fn turn_stage(&self) -> TurnStage {
        self.stage
    }

    /// Look up a diver.
    pub fn diver(&self, id: DiverId) -> EngineResult<&Diver> {
        Ok(self
            .divers
            .get(id)
            .ok_or(StateViolation::UnknownDiver(id))?)
    }

    #[must_use]
    pub fn divers(&self) -> &DiverMap<Diver> {
        &self.divers
    }

    /// Divers back at the start this round, in arrival order.
    #[must_use]
    pub fn return_order(&self) -> &[DiverId] {
        &self.return_order
    }

    /// Who opens the next round, once `end_round` has decided.
    #[must_use]
    pub fn next_starter(&self) -> Option<DiverId> {
        self.next_starter
    }

    /// Air is gone or every diver is back.
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.air <= 0 || self.divers.values().all(Diver::has_returned)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameEnd
    }

    #[must_use]
    pub fn is_last_round(&self) -> bool {
        self.round_number >= self.config.total_rounds
    }

    /// Banked total per diver.
    #[must_use]
    pub fn scores(&self) -> DiverMap<u32> {
        self.divers
            .values()
            .map(Diver::banked_total)
            .collect::<Vec<_>>()
            .into()
    }

    /// Every diver tied on the top banked total, in seat order.
    #[must_use]
    pub fn winners(&self) -> Vec<DiverId> {
        let scores = self.scores();
        let Some(best) = scores.values().copied().max() else {
            return Vec::new();
        };
        scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(id, _)| id)
            .collect()
    }

    /// Final result, `None` until the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_game_over()
            .then(|| GameResult::from_winners(self.winners()))
    }

    // === Precondition helpers ===

    pub(crate) fn require_phase(&self, expected: Phase) -> Result<(), StateViolation> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(StateViolation::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    pub(crate) fn require_current(&self, id: DiverId) -> Result<(), StateViolation> {
        if self.divers.get(id).is_none() {
            return Err(StateViolation::UnknownDiver(id));
        }
        if id != self.current {
            return Err(StateViolation::NotCurrentDiver {
                expected: self.current,
                got: id,
            });
        }
        Ok(())
    }
}
