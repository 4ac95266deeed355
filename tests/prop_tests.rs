//! Property-based tests for board dealing and turn resolution.

use proptest::prelude::*;

use deep_sea::board::{Board, DepthLevel, Tile};
use deep_sea::core::{BoardOptions, Dice, DiceConfig, GameConfig};
use deep_sea::divers::{Direction, Diver, Policy, TileAction};
use deep_sea::rules::GameBuilder;

fn sorted(mut tiles: Vec<Tile>) -> Vec<(u8, u32)> {
    let mut pairs: Vec<(u8, u32)> = tiles.drain(..).map(|t| (t.level().get(), t.value())).collect();
    pairs.sort_unstable();
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Dealt boards hold the canonical tiles with depth never decreasing.
    #[test]
    fn prop_default_board_distribution(seed in any::<u64>()) {
        let board = Board::create_default(&BoardOptions::default().with_seed(seed)).unwrap();

        prop_assert_eq!(board.len(), 37);
        prop_assert!(board.get_space(0).unwrap().is_start());

        let dealt: Vec<Tile> = board.iter().flat_map(|s| s.tiles().iter().copied()).collect();
        prop_assert_eq!(sorted(dealt.clone()), sorted(Board::canonical_tiles()));

        let levels: Vec<DepthLevel> = dealt.iter().map(Tile::level).collect();
        prop_assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Move and air follow the carry penalty exactly.
    #[test]
    fn prop_move_and_air_formula(
        rolls in prop::collection::vec(2u32..=6, 1..40),
        go_back in prop::collection::vec(any::<bool>(), 40),
        pick in prop::collection::vec(any::<bool>(), 40),
    ) {
        let mut game = GameBuilder::new()
            .divers([Diver::human("A"), Diver::human("B"), Diver::human("C")])
            .config(GameConfig::default().with_rounds(1))
            .dice(Dice::scripted(DiceConfig::default(), rolls).unwrap())
            .build()
            .unwrap();
        game.start().unwrap();

        for turn in 0..40 {
            if game.is_round_over() {
                break;
            }
            let id = game.current_diver();
            let before = game.diver(id).unwrap().clone();
            let was_ascending = before.is_ascending();
            let carried = before.carried_count() as u32;

            let summary = game.begin_turn(id, go_back[turn]).unwrap();
            prop_assert_eq!(summary.move_distance, summary.dice_roll.saturating_sub(carried));
            prop_assert_eq!(summary.air_after, summary.air_before - carried as i32);
            if was_ascending {
                prop_assert_eq!(summary.direction, Direction::Ascending);
            }

            let after = game.diver(id).unwrap();
            prop_assert!(!after.has_returned() || after.is_at_start());
            if summary.can_act {
                let action = if pick[turn] { TileAction::Pickup } else { TileAction::Drop };
                game.perform_action(id, action).unwrap();
            }
            if !game.is_round_over() {
                game.advance_to_next_diver().unwrap();
            }
        }
    }

    /// Snapshots never change without a mutating call in between.
    #[test]
    fn prop_snapshot_idempotent(seed in any::<u64>(), turns in 0usize..30) {
        let mut game = GameBuilder::new()
            .diver(Diver::new("A", Policy::balanced()))
            .diver(Diver::new("B", Policy::adventurous()))
            .config(GameConfig::default().with_seed(seed))
            .build()
            .unwrap();
        game.start().unwrap();
        for _ in 0..turns {
            if game.is_game_over() {
                break;
            }
            game.play_automated_turn().unwrap();
        }

        prop_assert_eq!(game.snapshot(), game.snapshot());
        prop_assert_eq!(game.scores(), game.scores());
        prop_assert_eq!(game.winners(), game.winners());
        prop_assert_eq!(game.is_round_over(), game.is_round_over());
    }

    /// Tiles are never created or destroyed, only moved.
    #[test]
    fn prop_tiles_conserved(seed in any::<u64>()) {
        let mut game = GameBuilder::new()
            .diver(Diver::new("A", Policy::cautious()))
            .diver(Diver::new("B", Policy::adventurous()))
            .diver(Diver::new("C", Policy::balanced()))
            .config(GameConfig::default().with_seed(seed))
            .build()
            .unwrap();
        let total = game.board().total_value();

        game.start().unwrap();
        while !game.is_game_over() {
            game.play_automated_turn().unwrap();
            let held: u32 = game
                .divers()
                .values()
                .map(|d| d.carried_value() + d.banked_total())
                .sum();
            prop_assert_eq!(game.board().total_value() + held, total);
        }
    }
}
