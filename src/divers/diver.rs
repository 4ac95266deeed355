//! Per-diver state.
//!
//! Round state (position, direction, returned flag, carried tiles) is reset
//! every round. Banked tiles persist for the whole game and are the score.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::policy::{Policy, TileAction};
use crate::board::{total_value, Space, Tile};

/// Tiles a diver is holding. Rarely more than four.
pub type CarriedTiles = SmallVec<[Tile; 4]>;

/// Which way a diver is heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Away from the start.
    #[default]
    Descending,
    /// Back towards the start. One-way within a round.
    Ascending,
}

impl Direction {
    #[must_use]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Direction::Ascending)
    }
}

/// A participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diver {
    name: String,
    policy: Policy,
    position: usize,
    direction: Direction,
    has_returned: bool,
    carried: CarriedTiles,
    banked: Vec<Tile>,
}

impl Diver {
    /// A diver driven by the given policy.
    pub fn new(name: impl Into<String>, policy: Policy) -> Self {
        Self {
            name: name.into(),
            policy,
            position: 0,
            direction: Direction::Descending,
            has_returned: false,
            carried: CarriedTiles::new(),
            banked: Vec::new(),
        }
    }

    /// A diver whose decisions come from outside the engine.
    pub fn human(name: impl Into<String>) -> Self {
        Self::new(name, Policy::Human)
    }

    // === Read access ===

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decision policy.
    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Driven by a built-in heuristic rather than a person.
    #[must_use]
    pub fn is_automated(&self) -> bool {
        self.policy.is_automated()
    }

    /// Space index.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// On the start space.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.position == 0
    }

    /// Current heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading back to the start.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }

    /// Made it back to the start this round.
    #[must_use]
    pub fn has_returned(&self) -> bool {
        self.has_returned
    }

    /// Tiles at risk, oldest first.
    #[must_use]
    pub fn carried(&self) -> &[Tile] {
        &self.carried
    }

    /// Tiles secured for good.
    #[must_use]
    pub fn banked(&self) -> &[Tile] {
        &self.banked
    }

    /// Carry penalty applied to air and movement.
    #[must_use]
    pub fn carried_count(&self) -> usize {
        self.carried.len()
    }

    /// Value of carried tiles.
    #[must_use]
    pub fn carried_value(&self) -> u32 {
        total_value(&self.carried)
    }

    /// Score.
    #[must_use]
    pub fn banked_total(&self) -> u32 {
        total_value(&self.banked)
    }

    // === Decisions ===

    /// Ask the policy whether to turn back.
    ///
    /// `None` for human divers; the caller supplies the decision.
    #[must_use]
    pub fn choose_direction(&self, air_remaining: i32) -> Option<bool> {
        self.policy
            .heuristic()
            .map(|policy| policy.choose_direction(self, air_remaining))
    }

    /// Ask the policy what to do on `space`.
    ///
    /// `None` for human divers.
    #[must_use]
    pub fn choose_action(&self, space: &Space, air_remaining: i32) -> Option<TileAction> {
        self.policy
            .heuristic()
            .map(|policy| policy.choose_action(self, space, air_remaining))
    }

    // === Mutation (engine only) ===

    /// Apply a heading. Ascending is one-way.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if !self.direction.is_ascending() {
            self.direction = direction;
        }
    }

    pub(crate) fn move_to(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn mark_returned(&mut self) {
        self.has_returned = true;
        self.position = 0;
    }

    pub(crate) fn take_tile(&mut self, tile: Tile) {
        self.carried.push(tile);
    }

    /// Give up the most recently taken tile.
    pub(crate) fn drop_last_tile(&mut self) -> Option<Tile> {
        self.carried.pop()
    }

    /// Lose everything carried (drowning).
    pub(crate) fn drop_all_carried(&mut self) -> CarriedTiles {
        std::mem::take(&mut self.carried)
    }

    /// Secure everything carried. Returns the value banked.
    pub(crate) fn bank_carried(&mut self) -> u32 {
        let value = self.carried_value();
        self.banked.extend(self.carried.drain(..));
        value
    }

    /// Back to the start, heading down, empty-handed.
    pub(crate) fn reset_for_round(&mut self) {
        self.position = 0;
        self.direction = Direction::Descending;
        self.has_returned = false;
        self.carried.clear();
    }

    /// Round reset plus forgetting all banked treasure.
    pub(crate) fn reset_for_game(&mut self) {
        self.banked.clear();
        self.reset_for_round();
    }
}

impl std::fmt::Display for Diver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = if self.is_ascending() { "↑" } else { "↓" };
        let role = if self.is_automated() { "AI" } else { "Human" };
        if self.is_at_start() {
            write!(f, "{} ({role}) - at start {arrow}", self.name)?;
        } else {
            write!(f, "{} ({role}) - space {} {arrow}", self.name, self.position)?;
        }
        write!(
            f,
            ", carrying {}, score {}",
            self.carried_count(),
            self.banked_total()
        )
    }
}
