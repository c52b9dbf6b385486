//! Benchmarks for shortest-path search and animation sampling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waypath_core::{find_path, Edge, Graph, GraphData, Node, PathAnimator};

/// A `side x side` grid with deterministic, uneven weights.
fn grid(side: usize) -> Graph {
    let id = |r: usize, c: usize| format!("n{}_{}", r, c);
    let mut data = GraphData::default();
    for r in 0..side {
        for c in 0..side {
            data.nodes
                .push(Node::new(id(r, c), id(r, c), c as f64 * 10.0, r as f64 * 10.0));
            if c + 1 < side {
                let w = ((r * 31 + c * 17) % 23 + 1) as f64;
                data.edges.push(Edge::new(id(r, c), id(r, c + 1), w));
            }
            if r + 1 < side {
                let w = ((r * 13 + c * 29) % 19 + 1) as f64;
                data.edges.push(Edge::new(id(r, c), id(r + 1, c), w));
            }
        }
    }
    Graph::from_data(data).expect("grid graph is well formed")
}

fn bench_pantheon(c: &mut Criterion) {
    let graph = Graph::pantheon();
    c.bench_function("find_path_pantheon", |b| {
        b.iter(|| find_path(black_box(&graph), black_box("afrodite"), black_box("hermes")))
    });
}

fn bench_grid(c: &mut Criterion) {
    let graph = grid(20);
    c.bench_function("find_path_grid_400", |b| {
        b.iter(|| find_path(black_box(&graph), black_box("n0_0"), black_box("n19_19")))
    });
}

fn bench_animation_sampling(c: &mut Criterion) {
    let path: Vec<String> = (0..50).map(|i| format!("n{}", i)).collect();
    c.bench_function("sample_120_frames", |b| {
        b.iter(|| {
            let mut animator = PathAnimator::new();
            let handle = animator.begin(path.clone(), 2000, 0.0).expect("non-empty path");
            for frame in 0..120 {
                black_box(animator.sample_at(handle, frame as f64 * 16.7).ok());
            }
        })
    });
}

criterion_group!(benches, bench_pantheon, bench_grid, bench_animation_sampling);
criterion_main!(benches);
