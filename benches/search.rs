use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze_pathfinder::{find_path, Algorithm, Coordinate, Grid, MazeGenerator};

fn load_generated_maze(seed: u64) -> (Grid, Coordinate, Coordinate) {
    let grid = MazeGenerator::new(Some(seed))
        .generate_maze(40, 80)
        .unwrap();
    // Both are lattice cells, so they are never walls
    (grid, Coordinate::new(1, 1), Coordinate::new(37, 73))
}

fn bench_algorithm(c: &mut Criterion, algorithm: Algorithm) {
    let (grid, start, end) = load_generated_maze(0);

    c.bench_function(&format!("maze_40x80_{:?}", algorithm), |b| {
        b.iter(|| {
            find_path(
                black_box(&grid),
                black_box(start),
                black_box(end),
                algorithm,
            )
            .unwrap()
        })
    });
}

pub fn breadth_first(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::Bfs);
}

pub fn depth_first(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::Dfs);
}

pub fn a_star(c: &mut Criterion) {
    bench_algorithm(c, Algorithm::AStar);
}

criterion_group!(benches, breadth_first, depth_first, a_star);
criterion_main!(benches);
