//! Game configuration types.
//!
//! - `DiceConfig`: how many dice are rolled and how many faces each has
//! - `BoardOptions`: how the default path is dealt
//! - `GameConfig`: rounds, air, dice, board and the master seed
//!
//! All of these are plain data; `GameConfig::validate` is the single place
//! where ranges are checked.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::seat::{MAX_DIVERS, MIN_DIVERS};

/// Largest total a dice shape may roll.
pub const MAX_DICE_TOTAL: u32 = 1_000;

/// Dice shape. Canonical game: two dice with faces 1..=3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    /// Dice rolled per turn.
    pub dice_count: u32,
    /// Faces per die; each die shows `1..=faces`.
    pub faces: u32,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            dice_count: 2,
            faces: 3,
        }
    }
}

impl DiceConfig {
    /// Create a dice configuration.
    #[must_use]
    pub const fn new(dice_count: u32, faces: u32) -> Self {
        Self { dice_count, faces }
    }

    /// Smallest possible total.
    #[must_use]
    pub const fn min_total(&self) -> u32 {
        self.dice_count
    }

    /// Largest possible total. Saturates at `u32::MAX`.
    #[must_use]
    pub const fn max_total(&self) -> u32 {
        self.dice_count.saturating_mul(self.faces)
    }

    /// Check that at least one die with one face is rolled, and that the
    /// total stays within `MAX_DICE_TOTAL`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 || self.faces == 0 {
            return Err(ConfigError::EmptyDice {
                dice_count: self.dice_count,
                faces: self.faces,
            });
        }
        if self.max_total() > MAX_DICE_TOTAL {
            return Err(ConfigError::DiceTooLarge {
                dice_count: self.dice_count,
                faces: self.faces,
                max: MAX_DICE_TOTAL,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for DiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.dice_count, self.faces)
    }
}

/// Options for dealing the default board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardOptions {
    /// Capacity of each dealt space. `None` for unlimited.
    pub max_stack_size: Option<usize>,

    /// Shuffle tile order within each depth level.
    pub shuffle_within_level: bool,

    /// Seed for the shuffle. `None` draws one from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            max_stack_size: None,
            shuffle_within_level: true,
            rng_seed: None,
        }
    }
}

impl BoardOptions {
    /// Deal in canonical order, without shuffling.
    #[must_use]
    pub fn unshuffled() -> Self {
        Self {
            shuffle_within_level: false,
            ..Self::default()
        }
    }

    /// Shuffle with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Cap every dealt space at `max` tiles.
    #[must_use]
    pub fn with_max_stack_size(mut self, max: usize) -> Self {
        self.max_stack_size = Some(max);
        self
    }

    /// Check the stack capacity, if one is set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stack_size == Some(0) {
            return Err(ConfigError::ZeroStackSize {
                field: "max_stack_size",
            });
        }
        Ok(())
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds in a game.
    pub total_rounds: u32,

    /// Air restored at the start of every round.
    pub air_per_round: i32,

    /// Dice shape.
    pub dice: DiceConfig,

    /// How the default board is dealt when no board is supplied.
    pub board: BoardOptions,

    /// Tiles per new space when drowned treasure sinks to the bottom.
    pub overflow_stack_size: usize,

    /// Master seed. Board and dice streams are derived from it unless
    /// overridden.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_rounds: 3,
            air_per_round: 25,
            dice: DiceConfig::default(),
            board: BoardOptions::default(),
            overflow_stack_size: 3,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.total_rounds = rounds;
        self
    }

    /// Set the air allotment per round.
    #[must_use]
    pub fn with_air(mut self, air: i32) -> Self {
        self.air_per_round = air;
        self
    }

    /// Set the dice shape.
    #[must_use]
    pub fn with_dice(mut self, dice: DiceConfig) -> Self {
        self.dice = dice;
        self
    }

    /// Set the board dealing options.
    #[must_use]
    pub fn with_board(mut self, board: BoardOptions) -> Self {
        self.board = board;
        self
    }

    /// Set the overflow stack size.
    #[must_use]
    pub fn with_overflow_stack_size(mut self, size: usize) -> Self {
        self.overflow_stack_size = size;
        self
    }

    /// Set the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate against the number of divers taking part.
    pub fn validate(&self, diver_count: usize) -> Result<(), ConfigError> {
        if !(MIN_DIVERS..=MAX_DIVERS).contains(&diver_count) {
            return Err(ConfigError::DiverCount { count: diver_count });
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.air_per_round <= 0 {
            return Err(ConfigError::NoAir {
                air: self.air_per_round,
            });
        }
        if self.overflow_stack_size == 0 {
            return Err(ConfigError::ZeroStackSize {
                field: "overflow_stack_size",
            });
        }
        self.dice.validate()?;
        self.board.validate()
    }
}
