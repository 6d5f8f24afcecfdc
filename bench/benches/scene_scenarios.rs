//! Scene scenario benchmarks using Criterion.
//!
//! Full engine frames of the mine field scenario at increasing sizes.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rusty_scene_bench::{
    frame_timer::measure_engine,
    scenario::{MineFieldConfig, MineFieldScenario},
};

// =============================================================================
// Mine Field Benchmarks
// =============================================================================

fn bench_mine_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario/mine_field");
    group.sample_size(20);

    for mines in [500, 2_000, 5_000] {
        group.throughput(Throughput::Elements(mines as u64));

        group.bench_with_input(BenchmarkId::new("frame", mines), &mines, |b, &n| {
            let mut scenario = MineFieldScenario::with_config(MineFieldConfig {
                mine_count: n,
                ..Default::default()
            });
            scenario.setup();

            b.iter(|| {
                scenario.update();
            });
        });
    }

    group.finish();
}

// =============================================================================
// Frame Time Distribution
// =============================================================================

fn bench_frame_times(c: &mut Criterion) {
    let mut scenario = MineFieldScenario::default();
    scenario.setup();
    match measure_engine(scenario.engine_mut(), 300) {
        Ok(stats) => println!("mine field ({} mines): {stats}", scenario.config().mine_count),
        Err(err) => eprintln!("mine field run failed: {err}"),
    }
    println!("ships took {} hit(s)", scenario.hits());

    // Keep criterion aware of the group so `-- frame_times` selects this function.
    c.benchmark_group("scenario/frame_times").finish();
}

criterion_group!(benches, bench_mine_field, bench_frame_times);
criterion_main!(benches);
