//! Read-only views for rendering.
//!
//! A `GameSnapshot` is an owned copy: front ends can hold on to it, diff it
//! or serialize it without touching the engine.

use serde::{Deserialize, Serialize};

use super::engine::Game;
use super::Phase;
use crate::core::DiverId;
use crate::divers::{Direction, Diver};

/// Everything a front end needs to draw the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub round_number: u32,
    pub total_rounds: u32,
    pub air_remaining: i32,
    pub air_per_round: i32,
    pub current_diver: DiverId,
    pub divers: Vec<DiverSummary>,
    pub board: Vec<SpaceSummary>,
}

/// Public state of one diver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiverSummary {
    pub id: DiverId,
    pub name: String,
    pub automated: bool,
    pub position: usize,
    pub direction: Direction,
    pub has_returned: bool,
    pub carried_count: usize,
    pub carried_value: u32,
    pub banked_total: u32,
}

/// Public state of one space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceSummary {
    pub index: usize,
    pub is_start: bool,
    pub tile_count: usize,
    /// Deepest level in the stack, `None` when empty.
    pub depth_level: Option<u8>,
    /// Divers standing here. Always empty for the start.
    pub occupants: Vec<DiverId>,
}

impl DiverSummary {
    fn new(id: DiverId, diver: &Diver) -> Self {
        Self {
            id,
            name: diver.name().to_string(),
            automated: diver.is_automated(),
            position: diver.position(),
            direction: diver.direction(),
            has_returned: diver.has_returned(),
            carried_count: diver.carried_count(),
            carried_value: diver.carried_value(),
            banked_total: diver.banked_total(),
        }
    }
}

impl Game {
    /// Copy out the public state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let board = self
            .board
            .iter()
            .enumerate()
            .map(|(index, space)| SpaceSummary {
                index,
                is_start: space.is_start(),
                tile_count: space.tile_count(),
                depth_level: space.depth_level().map(u8::from),
                occupants: if space.is_start() {
                    Vec::new()
                } else {
                    self.divers
                        .iter()
                        .filter(|(_, d)| !d.has_returned() && d.position() == index)
                        .map(|(id, _)| id)
                        .collect()
                },
            })
            .collect();

        GameSnapshot {
            phase: self.phase,
            round_number: self.round_number,
            total_rounds: self.config.total_rounds,
            air_remaining: self.air,
            air_per_round: self.config.air_per_round,
            current_diver: self.current,
            divers: self
                .divers
                .iter()
                .map(|(id, diver)| DiverSummary::new(id, diver))
                .collect(),
            board,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::{BoardOptions, Dice, DiceConfig};
    use crate::divers::Policy;
    use crate::rules::GameBuilder;

    #[test]
    fn test_snapshot_contents() {
        let mut game = GameBuilder::new()
            .diver(Diver::human("Ana"))
            .diver(Diver::new("Bot", Policy::cautious()))
            .board(Board::create_default(&BoardOptions::unshuffled()).unwrap())
            .dice(Dice::scripted(DiceConfig::default(), vec![3]).unwrap())
            .build()
            .unwrap();
        game.start().unwrap();
        game.begin_turn(DiverId::new(0), false).unwrap();

        let snap = game.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.air_remaining, 25);
        assert_eq!(snap.divers.len(), 2);
        assert_eq!(snap.divers[0].position, 3);
        assert!(!snap.divers[0].automated);
        assert!(snap.divers[1].automated);
        assert_eq!(snap.board.len(), 37);
        assert_eq!(snap.board[3].occupants, vec![DiverId::new(0)]);
        assert!(snap.board[0].occupants.is_empty());
        assert_eq!(snap.board[1].depth_level, Some(1));
        assert_eq!(snap.board[36].depth_level, Some(4));
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let game = GameBuilder::new()
            .divers([Diver::human("A"), Diver::human("B")])
            .build()
            .unwrap();
        assert_eq!(game.snapshot(), game.snapshot());
    }
}
