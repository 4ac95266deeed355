//! Built-in policies driving real games.

use deep_sea::core::{DiverId, GameConfig};
use deep_sea::divers::{Adventurous, Balanced, Cautious, Diver, Policy};
use deep_sea::rules::{GameBuilder, GameResult};

fn play(policies: &[Policy], seed: u64) -> deep_sea::rules::Game {
    let mut game = GameBuilder::new()
        .divers(
            policies
                .iter()
                .enumerate()
                .map(|(i, &p)| Diver::new(format!("{}-{i}", p.label()), p)),
        )
        .config(GameConfig::default().with_seed(seed))
        .build()
        .unwrap();
    game.play_out().unwrap();
    game
}

#[test]
fn test_every_mix_finishes() {
    let all = [Policy::balanced(), Policy::cautious(), Policy::adventurous()];
    for seed in 0..20 {
        for count in 2..=6 {
            let policies: Vec<Policy> = (0..count).map(|i| all[(i + seed as usize) % 3]).collect();
            let game = play(&policies, seed);
            assert!(game.is_game_over(), "seed {seed}, {count} divers");
        }
    }
}

#[test]
fn test_result_lists_top_scorers() {
    let game = play(&[Policy::balanced(), Policy::adventurous(), Policy::cautious()], 17);
    let scores = game.scores();
    let best = scores.values().copied().max().unwrap();

    match game.result().unwrap() {
        GameResult::Winner(id) => assert_eq!(scores[id], best),
        GameResult::Winners(ids) => {
            assert!(ids.len() > 1);
            assert!(ids.iter().all(|&id| scores[id] == best));
        }
    }
}

#[test]
fn test_cautious_banks_only_shallow_treasure() {
    for seed in 0..10 {
        let game = play(&[Policy::cautious(), Policy::cautious()], seed);
        for diver in game.divers().values() {
            assert!(diver.banked().iter().all(|t| t.is_shallow()));
        }
    }
}

#[test]
fn test_custom_thresholds() {
    let timid = Policy::Balanced(Balanced {
        base_floor: 30,
        ..Balanced::default()
    });
    let greedy = Policy::Adventurous(Adventurous {
        base_floor: 0,
        per_tile_floor: 0,
        ascent_pickup_air: 0,
    });
    let picky = Policy::Cautious(Cautious {
        max_pickup_level: 1,
        ..Cautious::default()
    });

    let game = play(&[timid, greedy, picky], 8);
    assert!(game.is_game_over());
    let picky_diver = game.diver(DiverId::new(2)).unwrap();
    assert!(picky_diver
        .banked()
        .iter()
        .all(|t| t.level().get() == 1));
}
