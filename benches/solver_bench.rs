//! Solver throughput benchmarks: rating formula, precomputed lookup and exhaustive search.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use squad_rating::optimizer::{
    find_optimal_solutions, find_squad_solutions, OptimalSearch, PriceTable, SquadSearch,
};
use squad_rating::rating::aggregate_rating;

fn inventory_83() -> Vec<u32> {
    let mut ratings = vec![83; 15];
    ratings.extend([82; 10]);
    ratings.extend([81; 50]);
    ratings.extend([84; 25]);
    ratings
}

fn prices_83() -> PriceTable {
    PriceTable::from([(81, 500), (82, 800), (83, 1000), (84, 2000)])
}

fn bench_rating(c: &mut Criterion) {
    let squad = [91, 88, 86, 86, 85, 84, 84, 83, 82, 80, 79];
    c.bench_function("aggregate_rating_full_squad", |b| {
        b.iter(|| aggregate_rating(black_box(&squad)))
    });
}

fn bench_solver(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver");
    group.sample_size(30);

    let optimal = OptimalSearch {
        available_ratings: inventory_83(),
        price_by_rating: prices_83(),
        ..OptimalSearch::new(83)
    };
    group.bench_function("precomputed_target_83", |b| {
        b.iter(|| find_optimal_solutions(black_box(&optimal)))
    });

    // four distinct ratings over eleven open slots: 364 candidate fills
    let exhaustive = SquadSearch {
        available_ratings: inventory_83(),
        price_by_rating: prices_83(),
        use_optimal_combinations: false,
        ..SquadSearch::new(83)
    };
    group.bench_function("exhaustive_target_83", |b| {
        b.iter(|| find_squad_solutions(black_box(&exhaustive)))
    });

    let wide = SquadSearch {
        existing_ratings: vec![86, 86, 86, 86, 86],
        available_ratings: (78..=90).flat_map(|r| [r; 6]).collect(),
        use_optimal_combinations: false,
        ..SquadSearch::new(85)
    };
    group.bench_function("exhaustive_six_slots_thirteen_ratings", |b| {
        b.iter(|| find_squad_solutions(black_box(&wide)))
    });

    group.finish();
}

criterion_group!(benches, bench_rating, bench_solver);
criterion_main!(benches);
