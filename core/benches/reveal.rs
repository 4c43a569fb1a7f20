use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::{Board, BoardConfig, Coord};

fn largest_empty_board() -> BoardConfig {
    BoardConfig::with_mines((Coord::MAX, Coord::MAX), 0).expect("valid config")
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    let default = BoardConfig::default();
    group.bench_function("default", |b| {
        b.iter(|| Board::new(black_box(default), black_box(17)).expect("valid board"))
    });

    let dense = BoardConfig::new((30, 16), 90, 110).expect("valid config");
    group.bench_function("dense", |b| {
        b.iter(|| Board::new(black_box(dense), black_box(17)).expect("valid board"))
    });

    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let config = largest_empty_board();

    c.bench_function("flood_fill/whole_board", |b| {
        b.iter_batched(
            || Board::new(config, 0).expect("valid board"),
            |mut board| board.reveal(black_box((0, 0))).expect("in bounds"),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
