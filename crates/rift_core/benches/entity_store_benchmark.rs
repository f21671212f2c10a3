//! # Entity Store Benchmark
//!
//! Measures the hot operations of the entity store:
//! - push into a pre-reserved store
//! - swap-and-pop removal
//! - one integration tick over every entity
//!
//! Run with: `cargo bench --package rift_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rift_core::{Action, ActorType, Attributes, Command, EntityStore, MovementData, PositionData};

const ENTITY_COUNT: usize = 100_000;

fn filled_store(count: usize) -> EntityStore {
    let mut store = EntityStore::with_capacity(count);
    for i in 0..count {
        let f = i as f32;
        store.push(
            PositionData::new(0, 0, f % 32.0, f % 32.0, 32, 32),
            MovementData::new(1.0, 0.5, 0.0, 0.0),
            ActorType::Rock,
            Attributes::EMPTY,
        );
    }
    store
}

/// Benchmark: push N entities into a reserved store.
fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_entities");

    for count in [1_000, 10_000, ENTITY_COUNT] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| black_box(filled_store(count)).len());
        });
    }

    group.finish();
}

/// Benchmark: remove every entity from the front via swap-and-pop.
fn bench_swap_remove(c: &mut Criterion) {
    c.bench_function("swap_remove_front_100k", |b| {
        b.iter_batched(
            || filled_store(ENTITY_COUNT),
            |mut store| {
                while !store.is_empty() {
                    let _ = black_box(store.swap_remove(0));
                }
                store
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: one integration step over all entities.
fn bench_integrate(c: &mut Criterion) {
    let mut store = filled_store(ENTITY_COUNT);
    let step = Action::Integrate { dt: 1.0 / 60.0 };

    c.bench_function("integrate_100k", |b| {
        b.iter(|| {
            let _ = step.execute(black_box(&mut store));
        });
    });
}

criterion_group!(benches, bench_push, bench_swap_remove, bench_integrate);
criterion_main!(benches);
