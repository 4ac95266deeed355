//! Turn resolution: direction, air, dice, movement and the tile action.
//!
//! ## Movement
//!
//! Divers move one space at a time. A space occupied by another diver who
//! is still out on the path is passed over without using up a step, so a
//! diver never ends a move on an occupied space.
//!
//! - Descending stops at the last space if the path runs out.
//! - Ascending into the start returns the diver; leftover steps are lost.
//! - A diver on the start of a path with no other spaces has nowhere to go
//!   and returns at once, so the round still ends.

use log::{debug, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::engine::Game;
use super::Phase;
use crate::board::Tile;
use crate::core::{DiverId, EngineResult, StateViolation};
use crate::divers::{Direction, Diver, TileAction};

/// Progress of the current diver's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    /// `begin_turn` not yet called.
    #[default]
    AwaitingMove,
    /// Moved; one `perform_action` call allowed. When `can_act` is false
    /// that call is a no-op.
    AwaitingAction { can_act: bool },
    /// Action resolved or skipped.
    Finished,
}

/// What happened during `begin_turn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSummary {
    pub diver: DiverId,
    pub round: u32,
    /// Heading after the ratchet and forced descent were applied.
    pub direction: Direction,
    pub dice_roll: u32,
    /// Roll minus carry penalty, never negative.
    pub move_distance: u32,
    pub air_before: i32,
    pub air_after: i32,
    pub start_position: usize,
    pub end_position: usize,
    /// Reached the start on this turn.
    pub returned: bool,
    /// A tile action is possible on the landing space.
    pub can_act: bool,
}

/// Where a move ends.
struct Landing {
    position: usize,
    returned: bool,
}

impl Game {
    /// Resolve direction, pay air, roll and move the current diver.
    ///
    /// Fails if the game is not being played, `diver` is not the current
    /// diver, the diver has already returned, this turn has already moved,
    /// or the round is already over.
    pub fn begin_turn(&mut self, diver: DiverId, wants_to_go_back: bool) -> EngineResult<TurnSummary> {
        self.require_phase(Phase::Playing)?;
        let state = self
            .divers
            .get(diver)
            .ok_or(StateViolation::UnknownDiver(diver))?;
        if state.has_returned() {
            return Err(StateViolation::DiverAlreadyReturned(diver).into());
        }
        self.require_current(diver)?;
        if self.stage != TurnStage::AwaitingMove {
            return Err(StateViolation::TurnAlreadyStarted(diver).into());
        }
        if self.is_round_over() {
            return Err(StateViolation::RoundStillRunning.into());
        }

        let direction = effective_direction(state, wants_to_go_back);
        let carried = state.carried_count() as u32;
        let start_position = state.position();

        let air_before = self.air;
        self.air -= carried as i32;

        let dice_roll = self.dice.roll();
        let move_distance = dice_roll.saturating_sub(carried);
        let landing = self.resolve_move(diver, start_position, direction, move_distance);

        let state = &mut self.divers[diver];
        state.set_direction(direction);
        if landing.returned {
            state.mark_returned();
            self.return_order.push(diver);
        } else {
            state.move_to(landing.position);
        }

        let can_act = !landing.returned && landing.position != 0 && self.air > 0;
        self.stage = TurnStage::AwaitingAction { can_act };

        let summary = TurnSummary {
            diver,
            round: self.round_number,
            direction,
            dice_roll,
            move_distance,
            air_before,
            air_after: self.air,
            start_position,
            end_position: landing.position,
            returned: landing.returned,
            can_act,
        };
        debug!(
            "{diver} rolled {dice_roll}, moved {move_distance} {:?}: {start_position} -> {}{}, air {air_before} -> {}",
            direction,
            landing.position,
            if landing.returned { " (returned)" } else { "" },
            self.air
        );
        Ok(summary)
    }

    /// Resolve the tile action for the turn begun by `begin_turn`.
    ///
    /// Illegal actions (pickup on an empty space, drop on an occupied one
    /// or with nothing carried, anything on the start) are no-ops returning
    /// `Ok(None)`. Otherwise returns the tile picked up or dropped.
    pub fn perform_action(&mut self, diver: DiverId, action: TileAction) -> EngineResult<Option<Tile>> {
        self.require_phase(Phase::Playing)?;
        self.require_current(diver)?;
        let can_act = match self.stage {
            TurnStage::AwaitingMove => return Err(StateViolation::TurnNotStarted(diver).into()),
            TurnStage::Finished => return Err(StateViolation::ActionAlreadyTaken(diver).into()),
            TurnStage::AwaitingAction { can_act } => can_act,
        };

        let position = self.divers[diver].position();
        let space = self.board.get_space_mut(position)?;
        self.stage = TurnStage::Finished;

        if action == TileAction::None {
            return Ok(None);
        }
        if !can_act || space.is_start() {
            warn!("{diver} cannot act this turn; ignoring {action:?}");
            return Ok(None);
        }

        let state = &mut self.divers[diver];
        match action {
            TileAction::None => Ok(None),
            TileAction::Pickup => {
                let Some(tile) = Tile::merge(space.tiles()) else {
                    warn!("{diver} tried to pick up from empty space {position}");
                    return Ok(None);
                };
                let stack = space.take_all();
                state.take_tile(tile);
                debug!("{diver} picked up {tile} ({} tiles) at space {position}", stack.len());
                Ok(Some(tile))
            }
            TileAction::Drop => {
                let Some(&tile) = state.carried().last() else {
                    warn!("{diver} has nothing to drop");
                    return Ok(None);
                };
                if space.has_tiles() {
                    warn!("{diver} tried to drop onto occupied space {position}");
                    return Ok(None);
                }
                space.push_tile(tile)?;
                state.drop_last_tile();
                debug!("{diver} dropped {tile} at space {position}");
                Ok(Some(tile))
            }
        }
    }

    /// Parse a text action code and perform it. Unknown codes act as `A`.
    pub fn perform_action_code(&mut self, diver: DiverId, code: &str) -> EngineResult<Option<Tile>> {
        let action = TileAction::from_code(code).unwrap_or_else(|| {
            warn!("unknown action code {code:?}; treating as no action");
            TileAction::None
        });
        self.perform_action(diver, action)
    }

    /// Pass the turn to the next diver still out on the path.
    ///
    /// Fails if the current turn has not begun or the round is over (call
    /// `end_round` instead).
    pub fn advance_to_next_diver(&mut self) -> EngineResult<DiverId> {
        self.require_phase(Phase::Playing)?;
        if self.stage == TurnStage::AwaitingMove {
            return Err(StateViolation::TurnNotStarted(self.current).into());
        }
        if self.is_round_over() {
            return Err(StateViolation::RoundStillRunning.into());
        }

        let count = self.divers.len();
        let next = (1..=count)
            .map(|offset| DiverId::new(((self.current.index() + offset) % count) as u8))
            .find(|&id| !self.divers[id].has_returned())
            .ok_or(StateViolation::RoundNotOver)?;

        self.current = next;
        self.stage = TurnStage::AwaitingMove;
        Ok(next)
    }

    /// Walk `distance` counted steps from `from`, skipping occupied spaces.
    fn resolve_move(&self, mover: DiverId, from: usize, direction: Direction, distance: u32) -> Landing {
        let occupied: FxHashSet<usize> = self
            .divers
            .iter()
            .filter(|(id, d)| *id != mover && !d.has_returned() && !d.is_at_start())
            .map(|(_, d)| d.position())
            .collect();
        let last = self.board.last_index();
        if from == 0 && last == 0 {
            return Landing {
                position: 0,
                returned: true,
            };
        }

        let mut position = from;
        for _ in 0..distance {
            match direction {
                Direction::Descending => {
                    let mut next = position + 1;
                    while next <= last && occupied.contains(&next) {
                        next += 1;
                    }
                    if next > last {
                        break;
                    }
                    position = next;
                }
                Direction::Ascending => {
                    let mut next = position.saturating_sub(1);
                    while next > 0 && occupied.contains(&next) {
                        next -= 1;
                    }
                    if next == 0 {
                        return Landing {
                            position: 0,
                            returned: true,
                        };
                    }
                    position = next;
                }
            }
        }
        Landing {
            position,
            returned: false,
        }
    }
}

/// Ascending sticks; a diver still on the start must descend.
fn effective_direction(diver: &Diver, wants_to_go_back: bool) -> Direction {
    if diver.is_ascending() {
        Direction::Ascending
    } else if diver.is_at_start() || !wants_to_go_back {
        Direction::Descending
    } else {
        Direction::Ascending
    }
}
