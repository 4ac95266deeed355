//! End-of-round scoring and the transition to the next round.
//!
//! ## Scoring
//!
//! Divers are processed from the deepest to the shallowest (ties in seat
//! order). A diver on the start banks what it carries; anyone else drowns
//! and loses it. Lost tiles sink to new spaces at the tail of the path in
//! the order they were dropped.
//!
//! ## Next starter
//!
//! - Everyone returned: the last diver to get back.
//! - Otherwise: the deepest diver still out (ties to the lower seat).

use std::cmp::Reverse;

use log::info;
use serde::{Deserialize, Serialize};

use super::engine::Game;
use super::turn::TurnStage;
use super::Phase;
use crate::board::Tile;
use crate::core::{DiverId, DiverMap, EngineResult, StateViolation};
use crate::divers::Diver;

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEndReason {
    /// Air reached zero or below.
    AirExhausted,
    /// Every diver made it back with air to spare.
    AllReturned,
}

/// Outcome of `end_round`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    pub reason: RoundEndReason,
    /// Value each diver banked this round.
    pub banked: DiverMap<u32>,
    /// Tiles lost by drowned divers, in drop order.
    pub sunk: Vec<Tile>,
    /// New tail spaces holding the sunk tiles.
    pub spaces_added: usize,
    /// Empty spaces removed by compression.
    pub spaces_removed: usize,
    pub next_starter: DiverId,
}

impl Game {
    /// Score the round, sink lost treasure, pick the next starter and
    /// compress the path.
    ///
    /// Fails unless the game is `Playing` and the round is over.
    pub fn end_round(&mut self) -> EngineResult<RoundReport> {
        self.require_phase(Phase::Playing)?;
        if !self.is_round_over() {
            return Err(StateViolation::RoundNotOver.into());
        }

        let reason = if self.air <= 0 {
            RoundEndReason::AirExhausted
        } else {
            RoundEndReason::AllReturned
        };
        let next_starter = self.choose_next_starter();

        let mut order: Vec<DiverId> = self.divers.ids().collect();
        order.sort_by_key(|&id| Reverse(self.divers[id].position()));

        let mut banked = DiverMap::with_value(self.divers.len(), 0);
        let mut sunk = Vec::new();
        for id in order {
            let diver = &mut self.divers[id];
            if diver.is_at_start() {
                banked[id] = diver.bank_carried();
            } else {
                sunk.extend(diver.drop_all_carried());
            }
        }

        let spaces_added = self
            .board
            .drop_tiles_to_bottom(sunk.iter().copied(), self.config.overflow_stack_size);
        let spaces_removed = self.board.compress_path();

        self.next_starter = Some(next_starter);
        self.phase = Phase::RoundEnd;
        self.stage = TurnStage::Finished;

        info!(
            "round {} ended ({:?}): banked {:?}, {} tiles sunk, path now {} spaces, {} starts next",
            self.round_number,
            reason,
            banked.values().collect::<Vec<_>>(),
            sunk.len(),
            self.board.len(),
            next_starter
        );

        Ok(RoundReport {
            round: self.round_number,
            reason,
            banked,
            sunk,
            spaces_added,
            spaces_removed,
            next_starter,
        })
    }

    /// Open the next round, or end the game after the last one.
    ///
    /// Returns the new phase. Fails unless the game is in `RoundEnd`.
    pub fn next_round(&mut self) -> EngineResult<Phase> {
        self.require_phase(Phase::RoundEnd)?;

        self.round_number += 1;
        if self.round_number > self.config.total_rounds {
            self.phase = Phase::GameEnd;
            info!("game over: scores {:?}", self.scores().values().collect::<Vec<_>>());
            return Ok(self.phase);
        }

        self.air = self.config.air_per_round;
        for diver in self.divers.values_mut() {
            diver.reset_for_round();
        }
        self.current = self.next_starter.take().unwrap_or(DiverId::new(0));
        self.return_order.clear();
        self.stage = TurnStage::AwaitingMove;
        self.phase = Phase::Playing;

        info!("round {} begins with {}", self.round_number, self.current);
        Ok(self.phase)
    }

    fn choose_next_starter(&self) -> DiverId {
        let all_returned = self.divers.values().all(Diver::has_returned);
        if all_returned {
            if let Some(&last) = self.return_order.last() {
                return last;
            }
        }
        self.divers
            .iter()
            .filter(|(_, d)| !d.has_returned())
            .max_by_key(|(id, d)| (d.position(), Reverse(*id)))
            .map_or(DiverId::new(0), |(id, _)| id)
    }
}
