//! Movement dice.
//!
//! `Dice` sums `dice_count` uniform draws over `1..=faces`. The source of
//! those draws is injectable: a seeded `GameRng` for normal play, or a
//! fixed script of totals for tests and replays.

use serde::{Deserialize, Serialize};

use super::config::DiceConfig;
use super::error::ConfigError;
use super::rng::{GameRng, GameRngState};

/// Where roll values come from.
#[derive(Clone, Debug)]
pub enum RollSource {
    /// Independent uniform draws from a deterministic stream.
    Seeded(GameRng),
    /// Fixed totals, returned in order and repeated once exhausted.
    Scripted { rolls: Vec<u32>, cursor: usize },
}

/// A set of dice.
#[derive(Clone, Debug)]
pub struct Dice {
    config: DiceConfig,
    source: RollSource,
}

impl Dice {
    /// Seeded dice.
    pub fn new(config: DiceConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            source: RollSource::Seeded(rng),
        })
    }

    /// Canonical 2d3 with a seed.
    #[must_use]
    pub fn canonical(seed: u64) -> Self {
        Self {
            config: DiceConfig::default(),
            source: RollSource::Seeded(GameRng::new(seed)),
        }
    }

    /// Dice that return the given totals in order.
    ///
    /// Every total must be reachable with `config`.
    pub fn scripted(config: DiceConfig, rolls: Vec<u32>) -> Result<Self, ConfigError> {
        config.validate()?;
        if rolls.is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        let (min, max) = (config.min_total(), config.max_total());
        if let Some(&roll) = rolls.iter().find(|&&r| r < min || r > max) {
            return Err(ConfigError::ScriptedRollOutOfRange { roll, min, max });
        }
        Ok(Self {
            config,
            source: RollSource::Scripted { rolls, cursor: 0 },
        })
    }

    /// Dice shape.
    #[must_use]
    pub fn config(&self) -> DiceConfig {
        self.config
    }

    /// Roll each die and return the faces.
    ///
    /// Scripted dice spread their total over the dice as evenly as
    /// possible.
    pub fn roll_individual(&mut self) -> Vec<u32> {
        let DiceConfig { dice_count, faces } = self.config;
        match &mut self.source {
            RollSource::Seeded(rng) => (0..dice_count).map(|_| rng.gen_inclusive(1, faces)).collect(),
            RollSource::Scripted { rolls, cursor } => {
                let total = rolls[*cursor % rolls.len()];
                *cursor = (*cursor + 1) % rolls.len();
                let base = total / dice_count;
                let extra = total % dice_count;
                (0..dice_count).map(|i| base + u32::from(i < extra)).collect()
            }
        }
    }

    /// Roll all dice and return the total.
    pub fn roll(&mut self) -> u32 {
        self.roll_individual().iter().sum()
    }

    /// Capture the dice for a save file.
    #[must_use]
    pub fn state(&self) -> DiceState {
        let source = match &self.source {
            RollSource::Seeded(rng) => RollSourceState::Seeded(rng.state()),
            RollSource::Scripted { rolls, cursor } => RollSourceState::Scripted {
                rolls: rolls.clone(),
                cursor: *cursor,
            },
        };
        DiceState {
            config: self.config,
            source,
        }
    }

    /// Rebuild dice from a save file.
    pub fn from_state(state: &DiceState) -> Result<Self, ConfigError> {
        match &state.source {
            RollSourceState::Seeded(rng) => Self::new(state.config, GameRng::from_state(rng)),
            RollSourceState::Scripted { rolls, cursor } => {
                let mut dice = Self::scripted(state.config, rolls.clone())?;
                if let RollSource::Scripted { cursor: c, .. } = &mut dice.source {
                    *c = cursor % rolls.len();
                }
                Ok(dice)
            }
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.config)
    }
}

/// Serializable dice state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    pub config: DiceConfig,
    pub source: RollSourceState,
}

/// Serializable roll source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollSourceState {
    Seeded(GameRngState),
    Scripted { rolls: Vec<u32>, cursor: usize },
}
