//! # Projection Benchmark
//!
//! `update_view` runs every tick for every entity; it must stay linear and cheap.
//!
//! Run with: `cargo bench --package rift_render`

// Benchmarks don't need docs
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rift_core::{ActorType, Attributes, MovementData, Observer, PositionData, WorldState};
use rift_render::ViewportProjection;

fn populated(count: usize) -> (WorldState, ViewportProjection) {
    let mut world = WorldState::new(count);
    let mut projection = ViewportProjection::new(32, count);
    for i in 0..count {
        let bx = i32::try_from(i % 1024).unwrap_or(0);
        let pos = PositionData::new(bx, bx / 2, 3.5, 7.25, 32, 32);
        world.add_entity(pos, MovementData::REST, ActorType::Rock, Attributes::EMPTY);
        projection.add_entity(&pos, None);
    }
    (world, projection)
}

/// Benchmark: recompute every screen position.
fn bench_update_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_view");

    for count in [1_000, 10_000, 100_000] {
        let (world, mut projection) = populated(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| projection.update_view(black_box(world.entities())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_update_view);
criterion_main!(benches);
