//! Benchmarks for the Elliptic Design Pipeline
//!
//! Run with: cargo bench -p cauer-core --bench design_bench

use cauer_core::filters::elliptic::synthesize;
use cauer_core::filters::freqs::{measure_stopband, DEFAULT_SWEEP_POINTS};
use cauer_core::filters::polynomial::roots;
use cauer_core::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ============================================================================
// Pipeline Stages
// ============================================================================

fn bench_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesis");

    for order in [5usize, 11, 25].iter() {
        group.bench_with_input(BenchmarkId::new("synthesize", order), order, |b, &order| {
            b.iter(|| synthesize(black_box(order), 0.1, 97.5, 20000.0))
        });
    }

    group.finish();
}

fn bench_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("roots");

    for order in [5usize, 11, 25].iter() {
        let tf = synthesize(*order, 0.1, 97.5, 20000.0).expect("valid prototype");
        group.bench_with_input(BenchmarkId::new("denominator", order), &tf, |b, tf| {
            b.iter(|| roots(black_box(&tf.denominator)))
        });
    }

    group.finish();
}

fn bench_stopband_sweep(c: &mut Criterion) {
    let tf = synthesize(11, 0.1, 97.5, 20000.0).expect("valid prototype");

    c.bench_function("measure_stopband_fast", |b| {
        b.iter(|| measure_stopband(black_box(&tf), 97.5, DEFAULT_SWEEP_POINTS))
    });
}

fn bench_decompose(c: &mut Criterion) {
    let tf = synthesize(11, 0.1, 97.5, 20000.0).expect("valid prototype");
    let decomposer = ResidueDecomposer::default();

    c.bench_function("decompose_fast", |b| {
        b.iter(|| decomposer.decompose(black_box(&tf)))
    });
}

// ============================================================================
// Full Designs
// ============================================================================

fn bench_design(c: &mut Criterion) {
    let mut group = c.benchmark_group("design");
    let designer = EllipticDesigner::new(DesignOptions::default());

    for spec in [FilterSpec::fast(), FilterSpec::best()].iter() {
        group.bench_with_input(BenchmarkId::new("elliptic", &spec.name), spec, |b, spec| {
            b.iter(|| designer.design(black_box(spec)))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let specs: Vec<FilterSpec> = (0..8)
        .map(|i| {
            let stopband_edge = 25000.0 + 1000.0 * i as f64;
            FilterSpec::new(format!("F{}", i), 20000.0, stopband_edge, 0.1, 97.5)
        })
        .collect();

    let designer = EllipticDesigner::new(DesignOptions::default());
    group.bench_function("sequential", |b| b.iter(|| designer.design_all(black_box(&specs))));

    let parallel = ParallelDesigner::new(DesignOptions::default());
    group.bench_function("parallel", |b| b.iter(|| parallel.design_all(black_box(&specs))));

    group.finish();
}

criterion_group!(
    benches,
    bench_synthesis,
    bench_roots,
    bench_stopband_sweep,
    bench_decompose,
    bench_design,
    bench_batch
);
criterion_main!(benches);
