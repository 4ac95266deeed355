//! Treasure tiles.
//!
//! A tile is an immutable (depth level, value) pair. Tiles are never
//! mutated; they move between a space's stack, a diver's carried list and a
//! diver's banked list.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Depth band of a tile, 1 (shallow) to 4 (deepest).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DepthLevel(u8);

impl DepthLevel {
    /// Shallowest band.
    pub const MIN: DepthLevel = DepthLevel(1);
    /// Deepest band.
    pub const MAX: DepthLevel = DepthLevel(4);

    /// Create a depth level, rejecting anything outside 1..=4.
    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ConfigError::DepthLevel { level })
        }
    }

    /// All four bands in path order.
    pub fn all() -> impl Iterator<Item = DepthLevel> {
        (Self::MIN.0..=Self::MAX.0).map(DepthLevel)
    }

    /// Raw level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DepthLevel {
    type Error = ConfigError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<DepthLevel> for u8 {
    fn from(level: DepthLevel) -> Self {
        level.0
    }
}

/// A treasure tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    level: DepthLevel,
    value: u32,
}

impl Tile {
    /// Create a tile.
    #[must_use]
    pub const fn new(level: DepthLevel, value: u32) -> Self {
        Self { level, value }
    }

    /// Collapse a stack into one tile: values summed, deepest level kept.
    ///
    /// Returns `None` for an empty stack.
    #[must_use]
    pub fn merge(tiles: &[Tile]) -> Option<Tile> {
        let level = tiles.iter().map(|t| t.level).max()?;
        let value = tiles.iter().map(|t| t.value).sum();
        Some(Tile { level, value })
    }

    /// Depth band.
    #[must_use]
    pub const fn level(&self) -> DepthLevel {
        self.level
    }

    /// Point value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Levels 1 and 2.
    #[must_use]
    pub const fn is_shallow(&self) -> bool {
        self.level.0 <= 2
    }

    /// Levels 3 and 4.
    #[must_use]
    pub const fn is_deep(&self) -> bool {
        self.level.0 >= 3
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[L{}:{}]", self.level.0, self.value)
    }
}

/// Sum of tile values.
#[must_use]
pub fn total_value<'a>(tiles: impl IntoIterator<Item = &'a Tile>) -> u32 {
    tiles.into_iter().map(Tile::value).sum()
}
