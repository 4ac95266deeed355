//! Spaces on the path.
//!
//! Space 0 is the start (the submarine) and never holds tiles. Every other
//! space holds a stack of tiles, optionally capped at `max_stack_size`.
//! The last tile pushed is the top of the stack.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::{DepthLevel, Tile};
use crate::core::BoardViolation;

/// Tile stack. Most spaces hold one tile, overflow spaces up to three.
pub type TileStack = SmallVec<[Tile; 3]>;

/// One position on the path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    is_start: bool,
    tiles: TileStack,
    max_stack_size: Option<usize>,
}

impl Space {
    /// The start space.
    #[must_use]
    pub fn start() -> Self {
        Self {
            is_start: true,
            tiles: TileStack::new(),
            max_stack_size: None,
        }
    }

    /// An empty regular space.
    #[must_use]
    pub fn empty(max_stack_size: Option<usize>) -> Self {
        Self {
            is_start: false,
            tiles: TileStack::new(),
            max_stack_size,
        }
    }

    /// A regular space pre-filled with `tiles`, bottom first.
    pub fn with_tiles(
        tiles: impl IntoIterator<Item = Tile>,
        max_stack_size: Option<usize>,
    ) -> Result<Self, BoardViolation> {
        let mut space = Self::empty(max_stack_size);
        for tile in tiles {
            space.push_tile(tile)?;
        }
        Ok(space)
    }

    /// Check the invariants of a deserialized space.
    pub(crate) fn check(&self) -> Result<(), BoardViolation> {
        if self.is_start && !self.tiles.is_empty() {
            return Err(BoardViolation::TilesOnStart);
        }
        match self.max_stack_size {
            Some(capacity) if self.tiles.len() > capacity => Err(BoardViolation::StackOverflow {
                count: self.tiles.len(),
                capacity,
            }),
            _ => Ok(()),
        }
    }

    /// Is this the start space?
    #[must_use]
    pub fn is_start(&self) -> bool {
        self.is_start
    }

    /// Tiles bottom to top.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Capacity, `None` for unlimited.
    #[must_use]
    pub fn max_stack_size(&self) -> Option<usize> {
        self.max_stack_size
    }

    /// At least one tile here.
    #[must_use]
    pub fn has_tiles(&self) -> bool {
        !self.tiles.is_empty()
    }

    /// Number of tiles here.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Deepest level in the stack.
    #[must_use]
    pub fn depth_level(&self) -> Option<DepthLevel> {
        self.tiles.iter().map(Tile::level).max()
    }

    /// Top of the stack without removing it.
    #[must_use]
    pub fn top_tile(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    /// Put a tile on top of the stack.
    pub fn push_tile(&mut self, tile: Tile) -> Result<(), BoardViolation> {
        if self.is_start {
            return Err(BoardViolation::TilesOnStart);
        }
        if let Some(capacity) = self.max_stack_size {
            if self.tiles.len() >= capacity {
                return Err(BoardViolation::StackOverflow {
                    count: self.tiles.len() + 1,
                    capacity,
                });
            }
        }
        self.tiles.push(tile);
        Ok(())
    }

    /// Remove and return the whole stack, bottom first.
    pub fn take_all(&mut self) -> TileStack {
        std::mem::take(&mut self.tiles)
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_start {
            return write!(f, "SUB");
        }
        match self.tiles.as_slice() {
            [] => write!(f, "."),
            [tile] => write!(f, "{tile}"),
            stack => write!(f, "{}R", stack.len()),
        }
    }
}
