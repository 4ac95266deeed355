//! The saved-game record and its conversion to and from `Game`.

use log::info;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{
    Dice, DiceState, DiverId, DiverMap, EngineError, EngineResult, GameConfig, StateViolation,
};
use crate::divers::Diver;
use crate::rules::{Game, Phase, TurnStage};

/// Bumped whenever the record layout changes.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a game exactly where it stopped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    pub config: GameConfig,
    pub phase: Phase,
    pub round_number: u32,
    pub air_remaining: i32,
    pub current_diver: DiverId,
    pub turn_stage: TurnStage,
    pub return_order: Vec<DiverId>,
    pub next_starter: Option<DiverId>,
    pub initial_board: Board,
    pub board: Board,
    pub divers: Vec<Diver>,
    pub dice: DiceState,
}

/// Capture a game.
#[must_use]
pub fn save(game: &Game) -> SavedGame {
    SavedGame {
        version: SAVE_VERSION,
        config: game.config.clone(),
        phase: game.phase,
        round_number: game.round_number,
        air_remaining: game.air,
        current_diver: game.current,
        turn_stage: game.stage,
        return_order: game.return_order.clone(),
        next_starter: game.next_starter,
        initial_board: game.initial_board.clone(),
        board: game.board.clone(),
        divers: game.divers.values().cloned().collect(),
        dice: game.dice.state(),
    }
}

/// Rebuild a game, checking the record for consistency first.
pub fn restore(saved: SavedGame) -> EngineResult<Game> {
    if saved.version != SAVE_VERSION {
        return Err(EngineError::SaveVersion {
            expected: SAVE_VERSION,
            found: saved.version,
        });
    }
    saved.config.validate(saved.divers.len())?;
    saved.board.check()?;
    saved.initial_board.check()?;

    let last = saved.board.last_index();
    for (index, diver) in saved.divers.iter().enumerate() {
        let id = DiverId::new(index as u8);
        if diver.has_returned() && !diver.is_at_start() {
            return Err(StateViolation::ReturnedAwayFromStart(id).into());
        }
        if diver.position() > last {
            return Err(StateViolation::PositionOffPath {
                diver: id,
                position: diver.position(),
            }
            .into());
        }
    }

    let count = saved.divers.len();
    let seats = saved
        .return_order
        .iter()
        .chain(saved.next_starter.iter())
        .chain(std::iter::once(&saved.current_diver));
    for &id in seats {
        if id.index() >= count {
            return Err(StateViolation::UnknownDiver(id).into());
        }
    }

    let dice = Dice::from_state(&saved.dice)?;
    info!(
        "restored game in round {} ({:?}), {} air left",
        saved.round_number, saved.phase, saved.air_remaining
    );

    Ok(Game {
        config: saved.config,
        initial_board: saved.initial_board,
        board: saved.board,
        dice,
        divers: DiverMap::from(saved.divers),
        round_number: saved.round_number,
        air: saved.air_remaining,
        current: saved.current_diver,
        phase: saved.phase,
        stage: saved.turn_stage,
        return_order: saved.return_order,
        next_starter: saved.next_starter,
    })
}

impl SavedGame {
    /// Compact binary encoding.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Human-readable encoding.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Game {
    /// Shorthand for `persist::save`.
    #[must_use]
    pub fn save(&self) -> SavedGame {
        save(self)
    }
}
