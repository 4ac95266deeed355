//! # deep-sea-engine
//!
//! Rules engine for a press-your-luck diving game. Divers share one air
//! supply, dive down a path of treasure tiles and must make it back to the
//! submarine before the air runs out to keep what they carry.
//!
//! ## Design Principles
//!
//! 1. **Pure state transitions**: the engine never performs I/O. Callers
//!    drive it one operation at a time and read snapshots back.
//!
//! 2. **Fail before mutating**: every operation checks its preconditions
//!    first, so an error leaves the game untouched.
//!
//! 3. **Deterministic**: all randomness flows from seeded `GameRng`
//!    streams, or from scripted dice, so games replay exactly.
//!
//! ## Modules
//!
//! - `core`: diver seats, RNG, dice, configuration, errors
//! - `board`: tiles, spaces and the path, with compression and overflow
//! - `divers`: per-diver state and decision policies
//! - `rules`: the round/turn engine, snapshots and autoplay
//! - `persist`: save records with bincode and JSON encodings
//!
//! ## Example
//!
//! ```
//! use deep_sea::{Diver, GameBuilder, Policy};
//!
//! let mut game = GameBuilder::new()
//!     .diver(Diver::new("Steady", Policy::balanced()))
//!     .diver(Diver::new("Bold", Policy::adventurous()))
//!     .build()
//!     .unwrap();
//!
//! let result = game.play_out().unwrap();
//! assert!(game.is_game_over());
//! for winner in game.winners() {
//!     assert!(result.is_winner(winner));
//! }
//! ```

pub mod core;
pub mod board;
pub mod divers;
pub mod rules;
pub mod persist;

// Re-export commonly used types
pub use crate::core::{
    BoardOptions, DiceConfig, GameConfig,
    Dice, GameRng,
    DiverId, DiverMap,
    EngineError, EngineResult, ConfigError, StateViolation, BoardViolation,
};

pub use crate::board::{Board, DepthLevel, Space, Tile};

pub use crate::divers::{Diver, Direction, Policy, DecisionPolicy, TileAction};

pub use crate::rules::{
    Game, GameBuilder, GameResult, Phase,
    TurnSummary, RoundReport, RoundEndReason, TurnOutcome,
    GameSnapshot, DiverSummary, SpaceSummary,
};

pub use crate::persist::SavedGame;
