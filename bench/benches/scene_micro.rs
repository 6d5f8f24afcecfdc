//! Scene microbenchmarks using Criterion.
//!
//! These benchmarks measure individual operations in isolation:
//! - Sphere overlap queries
//! - Singleton access (world registry and shared registry)
//! - Hierarchy spawn and destroy
//! - Random direction sampling

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rusty_scene::math::RandomExt;
use rusty_scene::physics::{LayerMask, QueryTriggerInteraction, overlap_sphere};
use rusty_scene::scene::Mode;
use rusty_scene::singleton::SharedSingletons;
use rusty_scene::{Error, Singleton, World};
use rusty_scene_bench::fixtures::{collider_world, hierarchy};

#[derive(Debug, Default, Singleton)]
struct Counter(u64);

// =============================================================================
// Overlap Benchmarks
// =============================================================================

fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("overlap");

    for count in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        let world = collider_world(count, 42);

        group.bench_with_input(BenchmarkId::new("all_layers", count), &world, |b, world| {
            b.iter(|| {
                black_box(overlap_sphere(
                    world,
                    black_box(Vec3::ZERO),
                    5.0,
                    LayerMask::EVERYTHING,
                    QueryTriggerInteraction::Ignore,
                ))
            });
        });

        group.bench_with_input(BenchmarkId::new("one_layer", count), &world, |b, world| {
            b.iter(|| {
                black_box(overlap_sphere(
                    world,
                    black_box(Vec3::ZERO),
                    5.0,
                    LayerMask::from_layers([1]),
                    QueryTriggerInteraction::Ignore,
                ))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Singleton Benchmarks
// =============================================================================

fn bench_singletons(c: &mut Criterion) {
    let mut group = c.benchmark_group("singleton");

    group.bench_function("world_get", |b| {
        let mut world = World::new(Mode::Play);
        world.singleton::<Counter>().unwrap();
        b.iter(|| {
            world.singleton::<Counter>().unwrap().0 += 1;
        });
    });

    group.bench_function("world_try_get", |b| {
        let mut world = World::new(Mode::Play);
        world.singleton::<Counter>().unwrap();
        b.iter(|| black_box(world.try_singleton::<Counter>().map(|c| c.0)));
    });

    group.bench_function("world_create_teardown", |b| {
        b.iter_batched(
            || World::new(Mode::Play),
            |mut world| {
                world.singleton::<Counter>().unwrap();
                world.notify_shutdown().unwrap();
                black_box(world.teardown_singleton::<Counter>().unwrap())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("shared_get", |b| {
        let shared = SharedSingletons::new();
        shared
            .get_or_try_init(|| Ok::<_, Error>(Counter(0)))
            .unwrap();
        b.iter(|| black_box(shared.get::<Counter>()));
    });

    group.finish();
}

// =============================================================================
// Hierarchy Benchmarks
// =============================================================================

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for (depth, breadth) in [(3, 4), (5, 3)] {
        let label = format!("{depth}x{breadth}");
        group.bench_function(BenchmarkId::new("spawn_destroy", &label), |b| {
            b.iter_batched(
                || World::new(Mode::Play),
                |mut world| {
                    let root = hierarchy(&mut world, depth, breadth);
                    world.destroy_immediate(root).unwrap();
                    black_box(world)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("world_position_leaf", &label), |b| {
            let mut world = World::new(Mode::Play);
            let mut leaf = hierarchy(&mut world, depth, breadth);
            while let Some(child) = world.children(leaf).first().copied() {
                leaf = child;
            }
            b.iter(|| black_box(world.world_position(leaf).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Random Benchmarks
// =============================================================================

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("random");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    group.bench_function("on_circle", |b| {
        b.iter(|| black_box(rng.next_on_circle_direction(black_box(2.0))))
    });
    group.bench_function("inside_sphere", |b| {
        b.iter(|| black_box(rng.next_inside_sphere_direction(black_box(2.0))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_overlap,
    bench_singletons,
    bench_hierarchy,
    bench_random
);
criterion_main!(benches);
