//! The depth-ordered path of spaces.
//!
//! ## Layout
//!
//! - `spaces[0]` is always the start and holds no tiles.
//! - `spaces[1..]` hold tiles, dealt so depth never decreases going down.
//!
//! ## Lifecycle
//!
//! - Dealt once per game by `create_default`.
//! - Shortened at the end of each round by `compress_path`.
//! - Extended at the tail by `drop_tiles_to_bottom` when drowned divers'
//!   treasure sinks.

use serde::{Deserialize, Serialize};

use super::space::Space;
use super::tile::{DepthLevel, Tile};
use crate::core::{BoardOptions, BoardViolation, EngineError, EngineResult, GameRng};

/// Values dealt at each depth level, each appearing twice.
///
/// Yields 12 / 12 / 8 / 4 tiles for levels 1 through 4. Bands do not
/// overlap, so a deeper tile is always worth more.
const LEVEL_VALUE_RANGES: [(u8, std::ops::RangeInclusive<u32>); 4] =
    [(1, 0..=5), (2, 6..=11), (3, 12..=15), (4, 16..=17)];

/// Copies of each value per level.
const COPIES_PER_VALUE: usize = 2;

/// The path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    /// Build a board from explicit spaces.
    ///
    /// Space 0 must be the start and no other space may be.
    pub fn new(spaces: Vec<Space>) -> Result<Self, BoardViolation> {
        let board = Self { spaces };
        board.check()?;
        Ok(board)
    }

    /// Check structural invariants (used after deserializing).
    pub fn check(&self) -> Result<(), BoardViolation> {
        let first = self.spaces.first().ok_or(BoardViolation::EmptyPath)?;
        if !first.is_start() {
            return Err(BoardViolation::StartNotFirst);
        }
        for (index, space) in self.spaces.iter().enumerate() {
            if index > 0 && space.is_start() {
                return Err(BoardViolation::ExtraStart { index });
            }
            space.check()?;
        }
        Ok(())
    }

    /// Deal the canonical 36-tile board.
    ///
    /// Tiles are shuffled only within their depth level; levels always run
    /// 1 → 4 along the path. One space per tile, after the start.
    ///
    /// Fails if `options` caps spaces at zero tiles.
    pub fn create_default(options: &BoardOptions) -> EngineResult<Self> {
        let mut rng = match options.rng_seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::create_default_with_rng(options, &mut rng)
    }

    /// Deal the canonical board drawing the shuffle from `rng`.
    ///
    /// `options.rng_seed` is ignored.
    pub fn create_default_with_rng(
        options: &BoardOptions,
        rng: &mut GameRng,
    ) -> EngineResult<Self> {
        options.validate()?;
        let mut spaces = Vec::with_capacity(1 + 36);
        spaces.push(Space::start());

        for level in DepthLevel::all() {
            let mut tiles = Self::level_tiles(level);
            if options.shuffle_within_level {
                rng.shuffle(&mut tiles);
            }
            for tile in tiles {
                spaces.push(Space::with_tiles([tile], options.max_stack_size)?);
            }
        }

        Ok(Self { spaces })
    }

    /// The canonical tile distribution, in unshuffled path order.
    #[must_use]
    pub fn canonical_tiles() -> Vec<Tile> {
        DepthLevel::all().flat_map(Self::level_tiles).collect()
    }

    fn level_tiles(level: DepthLevel) -> Vec<Tile> {
        LEVEL_VALUE_RANGES
            .iter()
            .filter(|(l, _)| *l == level.get())
            .flat_map(|(_, values)| values.clone())
            .flat_map(|value| std::iter::repeat(Tile::new(level, value)).take(COPIES_PER_VALUE))
            .collect()
    }

    /// Number of spaces, start included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Always false; the start space is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Index of the deepest space.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.spaces.len() - 1
    }

    /// Index of the start.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        0
    }

    /// All spaces in path order.
    #[must_use]
    pub fn spaces(&self) -> &[Space] {
        &self.spaces
    }

    /// Iterate over spaces in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// Bounds-checked access.
    pub fn get_space(&self, index: usize) -> EngineResult<&Space> {
        self.spaces.get(index).ok_or(EngineError::IndexOutOfRange {
            index,
            last: self.last_index(),
        })
    }

    pub(crate) fn get_space_mut(&mut self, index: usize) -> EngineResult<&mut Space> {
        let last = self.last_index();
        self.spaces
            .get_mut(index)
            .ok_or(EngineError::IndexOutOfRange { index, last })
    }

    /// Tiles still on the path.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.spaces.iter().map(Space::tile_count).sum()
    }

    /// Value of every tile still on the path.
    #[must_use]
    pub fn total_value(&self) -> u32 {
        self.spaces
            .iter()
            .flat_map(Space::tiles)
            .map(Tile::value)
            .sum()
    }

    /// Remove every non-start space without tiles.
    ///
    /// Keeps the order of the remaining spaces. Returns how many were
    /// removed.
    pub fn compress_path(&mut self) -> usize {
        let before = self.spaces.len();
        self.spaces.retain(|space| space.is_start() || space.has_tiles());
        before - self.spaces.len()
    }

    /// Append new spaces at the tail, `stack_size` tiles each.
    ///
    /// The last group may be partial. Tile order is preserved. Returns the
    /// number of spaces added.
    pub fn drop_tiles_to_bottom(
        &mut self,
        tiles: impl IntoIterator<Item = Tile>,
        stack_size: usize,
    ) -> usize {
        let stack_size = stack_size.max(1);
        let tiles: Vec<Tile> = tiles.into_iter().collect();
        let before = self.spaces.len();

        for group in tiles.chunks(stack_size) {
            let mut space = Space::empty(Some(stack_size));
            for &tile in group {
                // Each chunk fits its capacity.
                let _ = space.push_tile(tile);
            }
            self.spaces.push(space);
        }

        self.spaces.len() - before
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, space) in self.spaces.iter().enumerate() {
            if i > 0 {
                write!(f, " - ")?;
            }
            write!(f, "{space}")?;
        }
        Ok(())
    }
}
