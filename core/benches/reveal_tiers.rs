use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::{GameConfig, GameController, PlacementPolicy};

fn tiers() -> [(&'static str, GameConfig); 3] {
    [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ]
}

fn first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for policy in [PlacementPolicy::Scan, PlacementPolicy::Uniform] {
        for (name, config) in tiers() {
            let config = config.with_placement(policy);
            let start = (config.size.0 / 2, config.size.1 / 2);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", policy), name),
                &config,
                |b, &config| {
                    let mut seed = 0;
                    b.iter(|| {
                        seed += 1;
                        let mut game = GameController::new(config.with_seed(seed), ());
                        black_box(game.reveal(black_box(start)))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, first_reveal);
criterion_main!(benches);
