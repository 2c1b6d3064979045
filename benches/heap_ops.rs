//! Core operation benchmarks for the Fibonacci heap
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_ops
//! ```
//!
//! The `BinaryHeap` rows are a baseline for the operations both structures
//! support. `BinaryHeap` has no decrease_key, so that group runs alone.

use arena_fibonacci_heap::FibonacciHeap;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }
}

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg::new(seed);
    (0..n).map(|_| rng.next() % 1_000_000).collect()
}

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &SIZES {
        let keys = random_keys(n, 42);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.insert(k, ());
                }
                black_box(heap.len())
            })
        });
        group.bench_with_input(BenchmarkId::new("binary_heap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = BinaryHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.push(Reverse(k));
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_insert_then_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_drain");
    for &n in &SIZES {
        let keys = random_keys(n, 7);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.insert(k, ());
                }
                let mut sum = 0u64;
                while let Ok((k, ())) = heap.extract_min() {
                    sum = sum.wrapping_add(k);
                }
                black_box(sum)
            })
        });
        group.bench_with_input(BenchmarkId::new("binary_heap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = BinaryHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.push(Reverse(k));
                }
                let mut sum = 0u64;
                while let Some(Reverse(k)) = heap.pop() {
                    sum = sum.wrapping_add(k);
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for &n in &SIZES {
        let keys = random_keys(n, 1234);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(keys.len());
                let handles: Vec<_> = keys.iter().map(|&k| heap.insert(k + 1_000_000, ())).collect();
                // One extraction so the decreases hit consolidated trees.
                let _ = heap.extract_min();
                for (h, &k) in handles.iter().zip(keys) {
                    let _ = heap.decrease_key(h, k);
                }
                black_box(heap.minimum().map(|(k, _)| *k))
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for &n in &SIZES {
        let keys = random_keys(n, 99);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &keys, |b, keys| {
            b.iter(|| {
                let (left, right) = keys.split_at(keys.len() / 2);
                let mut a = FibonacciHeap::new();
                let mut other = FibonacciHeap::new();
                for &k in left {
                    a.insert(k, ());
                }
                for &k in right {
                    other.insert(k, ());
                }
                a.merge(other);
                black_box(a.len())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_then_drain,
    bench_decrease_key,
    bench_merge
);
criterion_main!(benches);
