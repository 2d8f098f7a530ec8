use criterion::{black_box, criterion_group, criterion_main, Criterion};

use eight_puzzle_search::{a_star, uniform_cost, Heuristic, Puzzle};

const HARD_START: &str = "867254301";
const MEDIUM_START: &str = "413726580";

fn bench_uniform_cost(c: &mut Criterion) {
    let start = Puzzle::parse(MEDIUM_START).unwrap();
    let goal = Puzzle::goal();
    c.bench_function("uniform_cost_medium", |b| {
        b.iter(|| uniform_cost(black_box(&start), black_box(&goal)))
    });
}

fn bench_a_star(c: &mut Criterion) {
    let goal = Puzzle::goal();
    for (name, start) in [("medium", MEDIUM_START), ("hard", HARD_START)] {
        let start = Puzzle::parse(start).unwrap();
        for h in Heuristic::ALL {
            c.bench_function(&format!("a_star_{}_{}", h, name), |b| {
                b.iter(|| a_star(black_box(&start), black_box(&goal), h))
            });
        }
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_uniform_cost, bench_a_star
}
criterion_main!(benches);
