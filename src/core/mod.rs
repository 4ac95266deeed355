//! Core engine types: diver seats, RNG, dice, configuration, errors.
//!
//! Nothing in here knows about turns or rounds; the rules engine in
//! `crate::rules` builds on these.

pub mod seat;
pub mod rng;
pub mod dice;
pub mod config;
pub mod error;

pub use seat::{DiverId, DiverMap, MAX_DIVERS, MIN_DIVERS};
pub use rng::{GameRng, GameRngState};
pub use dice::{Dice, DiceState, RollSource, RollSourceState};
pub use config::{BoardOptions, DiceConfig, GameConfig, MAX_DICE_TOTAL};
pub use error::{BoardViolation, ConfigError, EngineError, EngineResult, StateViolation};
