//! Decision policies for turning back and for handling tiles.
//!
//! Policies decide; they never apply anything. The engine validates what
//! they return and treats illegal actions as no-ops.
//!
//! - `DecisionPolicy`: the decision interface
//! - `Balanced`, `Cautious`, `Adventurous`: built-in heuristics, each
//!   carrying its own thresholds
//! - `Policy`: the closed set a diver can be driven by, `Human` included
//!
//! Every heuristic honours the ratchet: once a diver is ascending,
//! `choose_direction` keeps answering `true`.

use serde::{Deserialize, Serialize};

use super::diver::Diver;
use crate::board::Space;

// =============================================================================
// Actions
// =============================================================================

/// What a diver does on the space it landed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileAction {
    /// Leave the space alone.
    #[default]
    None,
    /// Take the whole stack as one tile.
    Pickup,
    /// Put the most recently taken tile down on an empty space.
    Drop,
}

impl TileAction {
    /// Parse a text-interface action code: `A` none, `B` pickup, `C` drop.
    ///
    /// Case and surrounding whitespace are ignored. Unknown codes give
    /// `None`.
    ///
    /// ```
    /// use deep_sea::divers::TileAction;
    ///
    /// assert_eq!(TileAction::from_code(" b "), Some(TileAction::Pickup));
    /// assert_eq!(TileAction::from_code("Z"), None);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Some(TileAction::None),
            "B" => Some(TileAction::Pickup),
            "C" => Some(TileAction::Drop),
            _ => None,
        }
    }

    /// Text-interface code for this action.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            TileAction::None => 'A',
            TileAction::Pickup => 'B',
            TileAction::Drop => 'C',
        }
    }
}

// =============================================================================
// Policy Interface
// =============================================================================

/// Decides direction and tile handling from the diver's own state.
///
/// Implementations must be pure: no side effects and no memory between
/// calls.
pub trait DecisionPolicy {
    /// `true` to ascend. Only asked when the diver is free to choose.
    fn choose_direction(&self, diver: &Diver, air_remaining: i32) -> bool;

    /// What to do on `space` after moving.
    fn choose_action(&self, diver: &Diver, space: &Space, air_remaining: i32) -> TileAction;
}

fn air_floor(base: i32, per_tile: i32, diver: &Diver) -> i32 {
    base + per_tile * diver.carried_count() as i32
}

// =============================================================================
// Balanced
// =============================================================================

/// Turns back once air nears what the current load needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balanced {
    /// Turn back at or below `base_floor + per_tile_floor * carried`.
    pub base_floor: i32,
    pub per_tile_floor: i32,
    /// While ascending, skip tiles at or below `ascent_margin + carried` air.
    pub ascent_margin: i32,
    /// Air considered critical.
    pub low_air: i32,
    /// Load considered heavy.
    pub heavy_load: usize,
}

impl Default for Balanced {
    fn default() -> Self {
        Self {
            base_floor: 5,
            per_tile_floor: 2,
            ascent_margin: 3,
            low_air: 3,
            heavy_load: 3,
        }
    }
}

impl DecisionPolicy for Balanced {
    fn choose_direction(&self, diver: &Diver, air_remaining: i32) -> bool {
        if diver.is_ascending() {
            return true;
        }
        if diver.carried_count() == 0 {
            return false;
        }
        air_remaining <= air_floor(self.base_floor, self.per_tile_floor, diver)
    }

    fn choose_action(&self, diver: &Diver, space: &Space, air_remaining: i32) -> TileAction {
        let heavy = diver.carried_count() >= self.heavy_load;

        if !space.has_tiles() {
            // Shed the newest tile when a heavy load would drown the ascent.
            let critical = air_remaining <= self.low_air * diver.carried_count() as i32;
            if diver.is_ascending() && heavy && critical {
                return TileAction::Drop;
            }
            return TileAction::None;
        }

        if diver.is_ascending() && air_remaining <= air_floor(self.ascent_margin, 1, diver) {
            return TileAction::None;
        }
        if air_remaining <= self.low_air && heavy {
            return TileAction::None;
        }
        TileAction::Pickup
    }
}

// =============================================================================
// Cautious
// =============================================================================

/// Turns back early, carries little and only shallow treasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cautious {
    /// Turn back empty-handed at or below this much air.
    pub empty_turn_back: i32,
    /// Turn back at or below `base_floor + per_tile_floor * carried`.
    pub base_floor: i32,
    pub per_tile_floor: i32,
    /// Stop picking up once carrying this many.
    pub max_carry: usize,
    /// Stop picking up at or below this much air.
    pub pickup_air_floor: i32,
    /// Deepest level worth taking.
    pub max_pickup_level: u8,
}

impl Default for Cautious {
    fn default() -> Self {
        Self {
            empty_turn_back: 16,
            base_floor: 14,
            per_tile_floor: 2,
            max_carry: 2,
            pickup_air_floor: 12,
            max_pickup_level: 2,
        }
    }
}

impl DecisionPolicy for Cautious {
    fn choose_direction(&self, diver: &Diver, air_remaining: i32) -> bool {
        if diver.is_ascending() {
            return true;
        }
        if diver.carried_count() == 0 {
            return air_remaining <= self.empty_turn_back;
        }
        air_remaining <= air_floor(self.base_floor, self.per_tile_floor, diver)
    }

    fn choose_action(&self, diver: &Diver, space: &Space, air_remaining: i32) -> TileAction {
        let Some(level) = space.depth_level() else {
            return TileAction::None;
        };
        if diver.is_ascending()
            || diver.carried_count() >= self.max_carry
            || air_remaining <= self.pickup_air_floor
            || level.get() > self.max_pickup_level
        {
            return TileAction::None;
        }
        TileAction::Pickup
    }
}

// =============================================================================
// Adventurous
// =============================================================================

/// Dives deep, grabs everything, turns back late.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adventurous {
    /// Turn back at or below `base_floor + per_tile_floor * carried`.
    pub base_floor: i32,
    pub per_tile_floor: i32,
    /// While ascending, still pick up above this much air.
    pub ascent_pickup_air: i32,
}

impl Default for Adventurous {
    fn default() -> Self {
        Self {
            base_floor: 2,
            per_tile_floor: 1,
            ascent_pickup_air: 5,
        }
    }
}

impl DecisionPolicy for Adventurous {
    fn choose_direction(&self, diver: &Diver, air_remaining: i32) -> bool {
        if diver.is_ascending() {
            return true;
        }
        air_remaining <= air_floor(self.base_floor, self.per_tile_floor, diver)
    }

    fn choose_action(&self, diver: &Diver, space: &Space, air_remaining: i32) -> TileAction {
        if !space.has_tiles() {
            return TileAction::None;
        }
        if diver.is_ascending() && air_remaining <= self.ascent_pickup_air {
            return TileAction::None;
        }
        TileAction::Pickup
    }
}

// =============================================================================
// Policy
// =============================================================================

/// How a diver makes decisions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Decisions are supplied by the caller.
    #[default]
    Human,
    Balanced(Balanced),
    Cautious(Cautious),
    Adventurous(Adventurous),
}

impl Policy {
    /// Balanced heuristic with default thresholds.
    #[must_use]
    pub fn balanced() -> Self {
        Policy::Balanced(Balanced::default())
    }

    /// Cautious heuristic with default thresholds.
    #[must_use]
    pub fn cautious() -> Self {
        Policy::Cautious(Cautious::default())
    }

    /// Adventurous heuristic with default thresholds.
    #[must_use]
    pub fn adventurous() -> Self {
        Policy::Adventurous(Adventurous::default())
    }

    /// Anything but `Human`.
    #[must_use]
    pub fn is_automated(&self) -> bool {
        !matches!(self, Policy::Human)
    }

    /// The heuristic behind this policy, `None` for humans.
    #[must_use]
    pub fn heuristic(&self) -> Option<&dyn DecisionPolicy> {
        match self {
            Policy::Human => None,
            Policy::Balanced(p) => Some(p),
            Policy::Cautious(p) => Some(p),
            Policy::Adventurous(p) => Some(p),
        }
    }

    /// Short name for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Policy::Human => "human",
            Policy::Balanced(_) => "balanced",
            Policy::Cautious(_) => "cautious",
            Policy::Adventurous(_) => "adventurous",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DepthLevel, Tile};
    use crate::divers::Direction;

    fn tile(level: u8, value: u32) -> Tile {
        Tile::new(DepthLevel::new(level).unwrap(), value)
    }

    fn diver_with(policy: Policy, carried: &[Tile], ascending: bool) -> Diver {
        let mut diver = Diver::new("Bot", policy);
        diver.move_to(5);
        for &t in carried {
            diver.take_tile(t);
        }
        if ascending {
            diver.set_direction(Direction::Ascending);
        }
        diver
    }

    fn stocked(level: u8) -> Space {
        Space::with_tiles([tile(level, 4)], None).unwrap()
    }

    #[test]
    fn test_action_codes() {
        assert_eq!(TileAction::from_code("A"), Some(TileAction::None));
        assert_eq!(TileAction::from_code("b"), Some(TileAction::Pickup));
        assert_eq!(TileAction::from_code(" c\n"), Some(TileAction::Drop));
        assert_eq!(TileAction::from_code(""), None);
        assert_eq!(TileAction::from_code("D"), None);
        assert_eq!(TileAction::Drop.code(), 'C');
    }

    #[test]
    fn test_balanced_direction() {
        let policy = Balanced::default();

        let empty = diver_with(Policy::balanced(), &[], false);
        assert!(!policy.choose_direction(&empty, 1));

        let loaded = diver_with(Policy::balanced(), &[tile(1, 1), tile(2, 4)], false);
        assert!(!policy.choose_direction(&loaded, 10));
        assert!(policy.choose_direction(&loaded, 9));
    }

    #[test]
    fn test_balanced_action() {
        let policy = Balanced::default();

        let diver = diver_with(Policy::balanced(), &[], false);
        assert_eq!(policy.choose_action(&diver, &stocked(2), 20), TileAction::Pickup);
        assert_eq!(policy.choose_action(&diver, &Space::empty(None), 20), TileAction::None);

        let ascending = diver_with(Policy::balanced(), &[tile(1, 1)], true);
        assert_eq!(policy.choose_action(&ascending, &stocked(1), 4), TileAction::None);
        assert_eq!(policy.choose_action(&ascending, &stocked(1), 5), TileAction::Pickup);

        let heavy = diver_with(Policy::balanced(), &[tile(1, 1), tile(1, 2), tile(2, 4)], false);
        assert_eq!(policy.choose_action(&heavy, &stocked(3), 3), TileAction::None);
    }

    #[test]
    fn test_balanced_sheds_load() {
        let policy = Balanced::default();
        let heavy = diver_with(Policy::balanced(), &[tile(1, 1), tile(1, 2), tile(2, 4)], true);

        assert_eq!(policy.choose_action(&heavy, &Space::empty(None), 9), TileAction::Drop);
        assert_eq!(policy.choose_action(&heavy, &Space::empty(None), 10), TileAction::None);
    }

    #[test]
    fn test_cautious() {
        let policy = Cautious::default();

        let empty = diver_with(Policy::cautious(), &[], false);
        assert!(!policy.choose_direction(&empty, 17));
        assert!(policy.choose_direction(&empty, 16));

        let one = diver_with(Policy::cautious(), &[tile(1, 2)], false);
        assert!(policy.choose_direction(&one, 16));
        assert!(!policy.choose_direction(&one, 17));

        assert_eq!(policy.choose_action(&empty, &stocked(2), 20), TileAction::Pickup);
        assert_eq!(policy.choose_action(&empty, &stocked(3), 20), TileAction::None);
        assert_eq!(policy.choose_action(&empty, &stocked(1), 12), TileAction::None);

        let full = diver_with(Policy::cautious(), &[tile(1, 1), tile(1, 2)], false);
        assert_eq!(policy.choose_action(&full, &stocked(1), 20), TileAction::None);
    }

    #[test]
    fn test_adventurous() {
        let policy = Adventurous::default();

        let diver = diver_with(Policy::adventurous(), &[tile(3, 8)], false);
        assert!(!policy.choose_direction(&diver, 4));
        assert!(policy.choose_direction(&diver, 3));
        assert_eq!(policy.choose_action(&diver, &stocked(4), 1), TileAction::Pickup);

        let ascending = diver_with(Policy::adventurous(), &[tile(3, 8)], true);
        assert_eq!(policy.choose_action(&ascending, &stocked(4), 6), TileAction::Pickup);
        assert_eq!(policy.choose_action(&ascending, &stocked(4), 5), TileAction::None);
    }

    #[test]
    fn test_ratchet_for_every_heuristic() {
        for policy in [Policy::balanced(), Policy::cautious(), Policy::adventurous()] {
            let diver = diver_with(policy, &[], true);
            for air in [-5, 0, 10, 25, 100] {
                assert_eq!(diver.choose_direction(air), Some(true), "{}", policy.label());
            }
        }
    }

    #[test]
    fn test_policies_respect_action_legality() {
        for policy in [Policy::balanced(), Policy::cautious(), Policy::adventurous()] {
            for ascending in [false, true] {
                let diver = diver_with(policy, &[], ascending);
                for air in -2..30 {
                    let action = diver.choose_action(&Space::empty(None), air);
                    assert_ne!(action, Some(TileAction::Pickup));
                    assert_ne!(action, Some(TileAction::Drop));
                }
            }
        }
    }

    #[test]
    fn test_policy_dispatch() {
        assert!(!Policy::Human.is_automated());
        assert!(Policy::Human.heuristic().is_none());
        assert!(Policy::cautious().is_automated());
        assert_eq!(Policy::adventurous().label(), "adventurous");
    }
}
