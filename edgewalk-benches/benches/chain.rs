//! Chain stepping and full sampler benchmarks.
//!
//! Compares the clone and delta candidate strategies over a fixed number of
//! steps, then measures complete sampler runs across worker counts.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use edgewalk_benches::{
    error::BenchSetupError,
    params::{ChainBenchParams, SamplerBenchParams},
    points::{PointSetConfig, generate_points},
};
use edgewalk_core::{CandidateStrategy, Chain, EnergyModel, ExecutionStrategy, SamplerBuilder};

/// Seed used for point generation and every chain.
const SEED: u64 = 42;

/// Steps taken per chain benchmark iteration.
const STEPS: u64 = 200;

/// Vertex counts for the strategy comparison.
const VERTEX_COUNTS: &[usize] = &[8, 32, 64];

/// Worker counts for the sampler benchmark.
const WORKER_COUNTS: &[usize] = &[1, 2, 4];

fn chain_steps_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("chain_steps");
    group.sample_size(20);
    group.throughput(Throughput::Elements(STEPS));
    let model = EnergyModel::new(1.0, 1.0)?;

    for &vertex_count in VERTEX_COUNTS {
        let points = generate_points(&PointSetConfig {
            point_count: vertex_count,
            seed: SEED,
        })?;
        for strategy in [CandidateStrategy::Clone, CandidateStrategy::Delta] {
            let chain = Chain::new(points.clone(), model, SEED, strategy)?;
            let params = ChainBenchParams {
                vertex_count,
                strategy,
            };
            group.bench_with_input(BenchmarkId::from_parameter(params), &chain, |b, chain| {
                b.iter(|| chain.clone().run(STEPS));
            });
        }
    }

    group.finish();
    Ok(())
}

fn sampler_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("sampler_run");
    group.sample_size(10);
    let vertex_count = 16;
    let points = generate_points(&PointSetConfig {
        point_count: vertex_count,
        seed: SEED,
    })?;

    for &workers in WORKER_COUNTS {
        let sampler = SamplerBuilder::new()
            .with_iterations(2_000)
            .with_workers(workers)
            .with_seed(SEED)
            .with_execution_strategy(ExecutionStrategy::Auto)
            .build()?;
        let params = SamplerBenchParams {
            vertex_count,
            workers,
        };
        group.bench_with_input(BenchmarkId::from_parameter(params), &sampler, |b, sampler| {
            b.iter(|| sampler.run(&points));
        });
    }

    group.finish();
    Ok(())
}

fn chain_steps(c: &mut Criterion) {
    if let Err(err) = chain_steps_impl(c) {
        panic!("chain_steps benchmark setup failed: {err}");
    }
}

fn sampler_run(c: &mut Criterion) {
    if let Err(err) = sampler_run_impl(c) {
        panic!("sampler_run benchmark setup failed: {err}");
    }
}

criterion_group!(benches, chain_steps, sampler_run);
criterion_main!(benches);
