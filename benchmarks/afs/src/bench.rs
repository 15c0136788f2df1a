//! AFS benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (500 to 20K pixels per order)
//! - Pipeline parameters (quantile, span)
//! - Real-world scenarios (blazed echelle orders, dense line forests)
//! - Noise-free blazes, where the continuum is almost collinear
//! - Batches of orders
//!
//! For the parallel batch path, use `cargo bench --features parallel`.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use afs::prelude::*;
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::f64::consts::PI;
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate a blazed echelle order: a sinc-squared blaze with Gaussian noise
/// and a handful of absorption lines.
fn generate_blazed_order(size: usize, n_lines: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.005).unwrap();
    let center_dist = Uniform::new(0.05, 0.95).unwrap();
    let depth_dist = Uniform::new(0.1, 0.8).unwrap();

    let wv: Vec<f64> = (0..size)
        .map(|i| 5000.0 + 50.0 * i as f64 / size as f64)
        .collect();

    let lines: Vec<(f64, f64)> = (0..n_lines)
        .map(|_| {
            (
                5000.0 + 50.0 * center_dist.sample(&mut rng),
                depth_dist.sample(&mut rng),
            )
        })
        .collect();

    let intensity: Vec<f64> = wv
        .iter()
        .map(|&w| {
            let t = PI * (w - 5025.0) / 40.0;
            let blaze = if t == 0.0 { 1.0 } else { (t.sin() / t).powi(2) };
            let absorption: f64 = lines
                .iter()
                .map(|&(c, d)| d * (-((w - c) / 0.05).powi(2)).exp())
                .sum();
            let flux = 1000.0 * blaze * (1.0 - absorption.min(0.95));
            (flux * (1.0 + noise_dist.sample(&mut rng))).max(0.0)
        })
        .collect();

    (wv, intensity)
}

/// Generate a smooth sloped continuum without lines.
fn generate_featureless_order(size: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise_dist = Normal::new(0.0, 0.002).unwrap();

    let wv: Vec<f64> = (0..size)
        .map(|i| 6000.0 + 40.0 * i as f64 / size as f64)
        .collect();
    let intensity: Vec<f64> = wv
        .iter()
        .map(|&w| (200.0 + 0.5 * (w - 6000.0)) * (1.0 + noise_dist.sample(&mut rng)))
        .collect();

    (wv, intensity)
}

/// Generate a noise-free blaze: thousands of consecutive pixels are almost
/// collinear, which stresses the triangulation.
fn generate_smooth_order(size: usize) -> (Vec<f64>, Vec<f64>) {
    let wv: Vec<f64> = (0..size)
        .map(|i| 5000.0 + 50.0 * i as f64 / size as f64)
        .collect();
    let intensity: Vec<f64> = (0..size)
        .map(|i| {
            let line = if i % 97 == 48 { 300.0 } else { 0.0 };
            800.0 + 200.0 * (PI * i as f64 / (size - 1) as f64).sin() - line
        })
        .collect();

    (wv, intensity)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");
    group.sample_size(20);

    for size in [500, 2000, 5000, 20000] {
        let (wv, intensity) = generate_blazed_order(size, size / 100, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("default", size), &size, |b, _| {
            b.iter(|| {
                Afs::<f64>::new()
                    .build()
                    .unwrap()
                    .normalize(black_box(&wv), black_box(&intensity))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_quantile(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantile");
    group.sample_size(30);

    let (wv, intensity) = generate_blazed_order(2000, 20, 42);

    for q in [0.5, 0.8, 0.95, 0.99] {
        group.bench_with_input(BenchmarkId::new("q", q), &q, |b, &q| {
            b.iter(|| {
                Afs::<f64>::new()
                    .quantile(q)
                    .build()
                    .unwrap()
                    .normalize(black_box(&wv), black_box(&intensity))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_span(c: &mut Criterion) {
    let mut group = c.benchmark_group("span");
    group.sample_size(30);

    let (wv, intensity) = generate_blazed_order(2000, 20, 42);

    for span in [0.1, 0.25, 0.5, 0.75] {
        group.bench_with_input(BenchmarkId::new("d", span), &span, |b, &span| {
            b.iter(|| {
                Afs::<f64>::new()
                    .span(span)
                    .build()
                    .unwrap()
                    .normalize(black_box(&wv), black_box(&intensity))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios");
    group.sample_size(20);

    let size = 4000;

    // Dense line forest
    let (wv_forest, in_forest) = generate_blazed_order(size, 200, 7);
    group.bench_function("line_forest", |b| {
        b.iter(|| {
            Afs::<f64>::new()
                .build()
                .unwrap()
                .normalize(black_box(&wv_forest), black_box(&in_forest))
                .unwrap()
        })
    });

    // No lines
    let (wv_flat, in_flat) = generate_featureless_order(size, 7);
    group.bench_function("featureless", |b| {
        b.iter(|| {
            Afs::<f64>::new()
                .build()
                .unwrap()
                .normalize(black_box(&wv_flat), black_box(&in_flat))
                .unwrap()
        })
    });

    // Noise-free blaze
    let (wv_smooth, in_smooth) = generate_smooth_order(size);
    group.bench_function("noise_free", |b| {
        b.iter(|| {
            Afs::<f64>::new()
                .allow_constant_windows()
                .build()
                .unwrap()
                .normalize(black_box(&wv_smooth), black_box(&in_smooth))
                .unwrap()
        })
    });

    // Intermediate products kept
    group.bench_function("diagnostics", |b| {
        b.iter(|| {
            Afs::<f64>::new()
                .return_diagnostics()
                .build()
                .unwrap()
                .normalize(black_box(&wv_forest), black_box(&in_forest))
                .unwrap()
        })
    });

    group.finish();
}

fn bench_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("orders");
    group.sample_size(10);

    let data: Vec<(Vec<f64>, Vec<f64>)> = (0..16)
        .map(|k| generate_blazed_order(2000, 20, 100 + k))
        .collect();
    let orders: Vec<Order<'_, f64>> = data.iter().map(|(w, y)| Order::new(w, y)).collect();
    let model = Afs::<f64>::new().build().unwrap();

    group.throughput(Throughput::Elements(orders.len() as u64));
    group.bench_function("batch_16", |b| {
        b.iter(|| model.normalize_orders(black_box(&orders)).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_quantile,
    bench_span,
    bench_scenarios,
    bench_orders,
);

criterion_main!(benches);
