use criterion::{criterion_group, criterion_main, Criterion};
use maze_explorer::{
    coordinates::Coordinate,
    generators,
    traversal::Traversal,
    units::{ColumnsCount, RowsCount},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| {
            generators::generate_with(Traversal::Recursive,
                                      RowsCount(32),
                                      ColumnsCount(32),
                                      Coordinate::new(0, 0),
                                      &mut rng)
        })
    });
}

fn bench_iterative_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("iterative_backtracker_maze_32", move |b| {
        b.iter(|| {
            generators::generate_with(Traversal::Iterative,
                                      RowsCount(32),
                                      ColumnsCount(32),
                                      Coordinate::new(0, 0),
                                      &mut rng)
        })
    });
}

fn bench_iterative_backtracker_maze_350(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(350);
    c.bench_function("iterative_backtracker_maze_350", move |b| {
        b.iter(|| {
            generators::generate_with(Traversal::Iterative,
                                      RowsCount(350),
                                      ColumnsCount(350),
                                      Coordinate::new(175, 175),
                                      &mut rng)
        })
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_iterative_backtracker_maze_32,
    bench_iterative_backtracker_maze_350
);
criterion_main!(benches);
