//! Error types for the engine.
//!
//! Every fallible operation checks its preconditions before touching any
//! state, so an `Err` always means nothing changed.

use thiserror::Error;

use super::seat::DiverId;
use crate::rules::Phase;

/// Result alias used throughout the crate.
pub type EngineResult<T> = Result<T, EngineError>;

/// Any failure surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid state: {0}")]
    InvalidState(#[from] StateViolation),

    #[error("space index {index} out of range (last index is {last})")]
    IndexOutOfRange { index: usize, last: usize },

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardViolation),

    #[error("binary save data: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("json save data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("save format version {found} is not supported (expected {expected})")]
    SaveVersion { expected: u32, found: u32 },
}

/// Construction-time validation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a game needs between 2 and 6 divers (got {count})")]
    DiverCount { count: usize },

    #[error("total rounds must be at least 1")]
    NoRounds,

    #[error("air per round must be positive (got {air})")]
    NoAir { air: i32 },

    #[error("dice need at least one die with at least one face (got {dice_count}d{faces})")]
    EmptyDice { dice_count: u32, faces: u32 },

    #[error("{dice_count}d{faces} can roll more than {max}")]
    DiceTooLarge { dice_count: u32, faces: u32, max: u32 },

    #[error("{field} must be at least 1")]
    ZeroStackSize { field: &'static str },

    #[error("scripted roll {roll} is outside {min}..={max}")]
    ScriptedRollOutOfRange { roll: u32, min: u32, max: u32 },

    #[error("scripted dice need at least one roll")]
    EmptyScript,

    #[error("depth level must be between 1 and 4 (got {level})")]
    DepthLevel { level: u8 },
}

/// An operation was invoked against a precondition it requires.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateViolation {
    #[error("operation requires phase {expected:?} but the game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("it is {expected}'s turn, not {got}'s")]
    NotCurrentDiver { expected: DiverId, got: DiverId },

    #[error("{0} has already returned this round")]
    DiverAlreadyReturned(DiverId),

    #[error("{0} has not started a turn")]
    TurnNotStarted(DiverId),

    #[error("{0} has already moved this turn")]
    TurnAlreadyStarted(DiverId),

    #[error("{0} has already acted this turn")]
    ActionAlreadyTaken(DiverId),

    #[error("the round is not over yet")]
    RoundNotOver,

    #[error("the round is over; end it before continuing")]
    RoundStillRunning,

    #[error("no diver in seat {0}")]
    UnknownDiver(DiverId),

    #[error("{0} is human-controlled and needs an external decision")]
    DecisionRequired(DiverId),

    #[error("{0} is away from the start but marked as returned")]
    ReturnedAwayFromStart(DiverId),

    #[error("{diver} stands on space {position} beyond the end of the path")]
    PositionOffPath { diver: DiverId, position: usize },
}

/// Structural problems with a path of spaces.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardViolation {
    #[error("a board needs at least the start space")]
    EmptyPath,

    #[error("space 0 must be the start")]
    StartNotFirst,

    #[error("space {index} is marked as a start but only space 0 may be")]
    ExtraStart { index: usize },

    #[error("the start space cannot hold tiles")]
    TilesOnStart,

    #[error("stack holds {count} tiles but its capacity is {capacity}")]
    StackOverflow { count: usize, capacity: usize },
}
