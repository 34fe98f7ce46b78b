use std::hint::black_box;

use concentration_core::*;
use criterion::{Criterion, criterion_group, criterion_main};

/// Plays a whole game with perfect memory: every pair found on the first try.
fn perfect_game(engine: &mut MatchEngine) {
    let total = engine.config().total_cells();
    let mut now = 0;
    for first in 0..total {
        if engine.card_at(first) != Some(CardState::Hidden) {
            continue;
        }
        let symbol = engine.deck().symbol_at(first);
        let second = (first + 1..total)
            .find(|&i| engine.deck().symbol_at(i) == symbol)
            .expect("every symbol has a twin");
        engine.reveal(first, now).expect("hidden card");
        engine.reveal(second, now).expect("hidden twin");
        now += 10;
    }
}

fn bench_deal(c: &mut Criterion) {
    c.bench_function("deal_hard_deck", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            RandomDeckGenerator::new(black_box(seed))
                .generate(Difficulty::Hard.game_config())
                .unwrap()
        })
    });
}

fn bench_perfect_game(c: &mut Criterion) {
    let setup = GameSetup::solo(Difficulty::Hard, "bench");
    let engine = MatchEngine::deal(setup, RandomDeckGenerator::new(7), EngineConfig::default()).unwrap();

    c.bench_function("perfect_hard_game", |b| {
        b.iter(|| {
            let mut engine = engine.clone();
            perfect_game(&mut engine);
            black_box(engine.take_events())
        })
    });
}

criterion_group!(benches, bench_deal, bench_perfect_game);
criterion_main!(benches);
