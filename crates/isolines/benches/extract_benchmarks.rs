//! Benchmarks for isoline extraction and overlay rendering.
//!
//! Run with: cargo bench --package isolines --bench extract_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use isolines::{render_overlay, IsolineExtractor, OverlayStyle, ScalarGrid};
use rand::Rng;
use test_utils::{create_checkerboard_grid, create_smooth_field};

/// Smooth field with random noise (more, shorter segments).
fn generate_noisy_field(width: usize, height: usize) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    create_smooth_field(width, height)
        .into_iter()
        .map(|v| (v + rng.gen_range(-0.05..0.05)).clamp(0.0, 1.0))
        .collect()
}

// =============================================================================
// EXTRACTION BENCHMARKS
// =============================================================================

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");

    let sizes = [(64, 64), (256, 256), (512, 512), (1024, 768)];

    for (width, height) in sizes {
        let smooth_data = create_smooth_field(width, height);
        let noisy_data = generate_noisy_field(width, height);

        group.throughput(Throughput::Elements((width * height) as u64));

        for (name, data) in [("smooth", &smooth_data), ("noisy", &noisy_data)] {
            let grid = ScalarGrid::new(data, width, height).unwrap();
            let mut extractor = IsolineExtractor::with_grid(grid);

            group.bench_function(BenchmarkId::new(name, format!("{}x{}", width, height)), |b| {
                b.iter(|| {
                    extractor.compute(black_box(0.5));
                    black_box(extractor.isolines().len())
                });
            });
        }
    }

    group.finish();
}

fn bench_saddle_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("saddle_heavy");

    for size in [128usize, 512] {
        let data = create_checkerboard_grid(size, size);
        let grid = ScalarGrid::new(&data, size, size).unwrap();
        let mut extractor = IsolineExtractor::with_grid(grid);

        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_function(BenchmarkId::new("checkerboard", size), |b| {
            b.iter(|| extractor.compute(black_box(0.5)));
        });
    }

    group.finish();
}

// =============================================================================
// RENDERING BENCHMARKS
// =============================================================================

fn bench_render_overlay(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_overlay");
    group.sample_size(20);

    let data = create_smooth_field(256, 256);
    let grid = ScalarGrid::new(&data, 256, 256).unwrap();
    let mut extractor = IsolineExtractor::with_grid(grid);
    extractor.compute(0.5);
    let bbox = grid.default_bbox();

    for scale in [1u32, 2, 4] {
        let style = OverlayStyle {
            scale,
            ..OverlayStyle::default()
        };
        group.bench_with_input(BenchmarkId::new("scale", scale), &style, |b, style| {
            b.iter(|| render_overlay(&grid, &bbox, black_box(extractor.isolines()), 0.5, style));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute, bench_saddle_heavy, bench_render_overlay);
criterion_main!(benches);
