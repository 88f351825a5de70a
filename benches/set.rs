// Copyright 2025 Ojima Abraham
// SPDX-License-Identifier: Apache-2.0

//! Benchmarks for persistent set operations.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use fatset::{NaturalOrder, ResolveStrategy, Set, SetConfig, Version, VersionTracker};
use rand::Rng;

fn populated(n: usize, strategy: ResolveStrategy) -> Set<u64> {
    let mut rng = rand::thread_rng();
    let config = SetConfig::new()
        .with_resolve(strategy)
        .with_node_capacity(n);
    let mut set = Set::with_config(config, NaturalOrder);
    for _ in 0..n {
        set = set.add(rng.gen::<u64>()).unwrap();
    }
    set
}

/// Builds a set where every add branches off a random earlier version.
fn branchy(n: usize) -> Vec<Set<u64>> {
    let mut rng = rand::thread_rng();
    let mut handles = vec![Set::new()];
    for _ in 0..n {
        let base = rng.gen_range(0..handles.len());
        let next = handles[base].add(rng.gen::<u64>()).unwrap();
        handles.push(next);
    }
    handles
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    for strategy in [ResolveStrategy::Linear, ResolveStrategy::Bisect] {
        let set = populated(10_000, strategy);
        group.bench_with_input(
            BenchmarkId::new("add", format!("{:?}", strategy)),
            &set,
            |b, set| b.iter(|| set.add(rand::random::<u64>()).unwrap()),
        );
    }

    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let handles = branchy(10_000);

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("contains_branchy", |b| {
        b.iter_batched(
            || {
                let mut rng = rand::thread_rng();
                (rng.gen_range(0..handles.len()), rng.gen::<u64>())
            },
            |(i, probe)| handles[i].contains(&probe).unwrap(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_to_vec(c: &mut Criterion) {
    let set = populated(10_000, ResolveStrategy::default());

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(10_000));

    group.bench_function("to_vec_10k", |b| b.iter(|| set.to_vec()));

    group.finish();
}

fn bench_ancestry(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let mut tracker = VersionTracker::new();
    for _ in 0..100_000 {
        let latest = tracker.latest().get();
        // Mostly linear history with occasional branches.
        let parent = if rng.gen_bool(0.9) {
            latest
        } else {
            rng.gen_range(0..=latest)
        };
        tracker.add(Version::new(parent));
    }
    let n = tracker.count_allocated() as u64;

    let mut group = c.benchmark_group("version");
    group.throughput(Throughput::Elements(1));

    group.bench_function("is_ancestor", |b| {
        b.iter_batched(
            || {
                let mut rng = rand::thread_rng();
                (
                    Version::new(rng.gen_range(0..n)),
                    Version::new(rng.gen_range(0..n)),
                )
            },
            |(a, v)| tracker.is_ancestor(a, v).unwrap(),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_contains, bench_to_vec, bench_ancestry);
criterion_main!(benches);
