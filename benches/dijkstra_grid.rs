//! Dijkstra and Prim on grid graphs
//!
//! Grids with random weights give every vertex several competing
//! predecessors, so a large share of relaxations end in `decrease_key`.

use arena_fibonacci_heap::graph::Graph;
use arena_fibonacci_heap::mst::prim;
use arena_fibonacci_heap::shortest_paths::dijkstra;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next_range(&mut self, min: u32, max: u32) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        min + ((self.state >> 16) % (max - min) as u64) as u32
    }
}

/// `side x side` grid with edges to the right and down neighbors
fn grid(side: u32, directed: bool, seed: u64) -> Graph<(u32, u32), u32> {
    let mut rng = Lcg::new(seed);
    let mut g = Graph::new(directed);
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                g.add_edge((r, c), (r, c + 1), rng.next_range(1, 100));
            }
            if r + 1 < side {
                g.add_edge((r, c), (r + 1, c), rng.next_range(1, 100));
            }
        }
    }
    g
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_grid");
    group.sample_size(20);
    for side in [32u32, 128, 256] {
        let g = grid(side, false, 17);
        group.bench_with_input(BenchmarkId::new("fibonacci", side * side), &g, |b, g| {
            b.iter(|| {
                let paths = dijkstra(g, &(0, 0)).unwrap();
                black_box(paths.distance(&(side - 1, side - 1)))
            })
        });
    }
    group.finish();
}

fn bench_prim(c: &mut Criterion) {
    let mut group = c.benchmark_group("prim_grid");
    group.sample_size(20);
    for side in [32u32, 128, 256] {
        let g = grid(side, false, 23);
        group.bench_with_input(BenchmarkId::new("fibonacci", side * side), &g, |b, g| {
            b.iter(|| black_box(prim(g, &(0, 0)).unwrap().total_weight()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_prim);
criterion_main!(benches);
