use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineclear_core::*;

const TIERS: [(&str, GameConfig); 3] = [
    ("classic", GameConfig::new_unchecked(9, 10)),
    ("medium", GameConfig::new_unchecked(16, 40)),
    ("sparse", GameConfig::new_unchecked(64, 100)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut generator = RandomBoardGenerator::new(0xdead_beef);
            b.iter(|| generator.generate(black_box(config)).unwrap());
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for (name, config) in TIERS {
        let grid = RandomBoardGenerator::new(7).generate(config).unwrap();
        let Some((start, _)) = grid.iter().find(|&(_, value)| value == 0) else {
            continue;
        };
        let open = BTreeSet::new();
        group.bench_with_input(BenchmarkId::from_parameter(name), &start, |b, &start| {
            b.iter(|| reveal(black_box(&grid), &open, start));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
