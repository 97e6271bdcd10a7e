//! Benchmarks for harmonization operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use harmony_core::{HarmonicTemplate, HsvImage, Hue, HueHistogram, TemplateShape};
use harmony_ops::harmonize::{harmonize, HarmonizeOptions};
use harmony_ops::partition::partition;
use harmony_ops::remap::RemapTable;
use harmony_ops::search::{search, search_shapes};

/// Hue plane with a couple of dominant clusters and some noise.
fn synthetic_hues(n: usize) -> Vec<u8> {
    (0..n)
        .map(|i| match i % 7 {
            0..=3 => (30 + (i * 13) % 20) as u8,
            4 | 5 => (150 + (i * 7) % 30) as u8,
            _ => (i * 31 % 256) as u8,
        })
        .collect()
}

/// Benchmark the full template search.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    let hues = synthetic_hues(4096);
    let sats = vec![200u8; hues.len()];
    let hist = HueHistogram::from_pixels(&hues, &sats).unwrap();

    group.throughput(Throughput::Elements(7 * 256));
    group.bench_function("all_shapes", |b| b.iter(|| search(black_box(&hist)).unwrap()));

    group.throughput(Throughput::Elements(256));
    group.bench_function("single_shape_V", |b| {
        b.iter(|| search_shapes(black_box(&hist), &[TemplateShape::V]).unwrap())
    });

    group.finish();
}

/// Benchmark partition and remap on growing hue planes.
fn bench_partition_remap(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_remap");
    let template = HarmonicTemplate::new(TemplateShape::X, Hue::from_u8(20)).unwrap();
    let table = RemapTable::new(&template);

    for size in [10_000usize, 100_000, 1_000_000].iter() {
        let hues = synthetic_hues(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("partition", size), &hues, |b, h| {
            b.iter(|| partition(black_box(h), &template))
        });

        let parts = partition(&hues, &template);
        group.bench_with_input(BenchmarkId::new("remap_apply", size), &hues, |b, h| {
            b.iter(|| table.apply(black_box(h), &parts).unwrap())
        });
    }

    group.bench_function("remap_table_build", |b| {
        b.iter(|| RemapTable::new(black_box(&template)))
    });

    group.finish();
}

/// Benchmark the end-to-end pipeline on a 512x512 plane.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let (w, h) = (512u32, 512u32);
    let n = (w * h) as usize;
    let image = HsvImage::new(w, h, synthetic_hues(n), vec![180; n], vec![200; n]).unwrap();

    group.throughput(Throughput::Elements(n as u64));
    group.bench_function("harmonize_512", |b| {
        b.iter(|| harmonize(black_box(&image), &HarmonizeOptions::new()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_search, bench_partition_remap, bench_pipeline);
criterion_main!(benches);
