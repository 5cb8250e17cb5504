//! Seeded full-game playthroughs: every turn the boss reveals a card, each
//! player draws, plays the first card it can and passes.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use boss_rules::core::{Game, GameRng, Phase, Seat};
use boss_rules::rules::{Engine, RoleAssignment};

fn play_to_end(engine: &Engine, seed: u64) -> Game {
    let seats: Vec<_> = ["boss", "a", "b", "c", "d"]
        .iter()
        .map(|&id| Seat::new(id, id))
        .collect();
    let mut rng = GameRng::new(seed);
    let mut game = engine
        .start_game(&seats, RoleAssignment::FirstJoined, &mut rng)
        .unwrap();

    while !game.is_over() {
        let current = game.current_player_id().unwrap().to_string();
        game = match game.phase {
            Phase::Dictatorship => engine.process_dictatorship_phase(&game, "boss").unwrap().game,
            Phase::SubordinateConsultation => {
                let closer = game.subordinates().find(|p| !p.is_down()).unwrap().id.to_string();
                engine.end_subordinate_consultation(&game, &closer).unwrap()
            }
            Phase::SubordinateTurn | Phase::BossTurn => {
                let drawn = engine.draw_card(&game, &current, &mut rng).unwrap().game;
                let target = if current == "boss" { "a" } else { "boss" };
                let played = drawn.hand(&current).iter().find_map(|card| {
                    engine
                        .play_card(&drawn, &current, card.as_str(), Some(target), &mut rng)
                        .ok()
                });
                match played {
                    Some(outcome) if outcome.game.is_over() => outcome.game,
                    Some(outcome) => engine.pass_turn(&outcome.game, &current).unwrap(),
                    None => engine.pass_turn(&drawn, &current).unwrap(),
                }
            }
            Phase::TurnEnd => engine.pass_turn(&game, &current).unwrap(),
        };
    }
    game
}

fn bench_playthrough(c: &mut Criterion) {
    let engine = Engine::default();
    let mut seed = 0u64;
    c.bench_function("five_player_playthrough", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(play_to_end(&engine, black_box(seed)))
        })
    });
}

criterion_group!(benches, bench_playthrough);
criterion_main!(benches);
