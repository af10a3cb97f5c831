//! Benchmarks for grid reference parsing, conversion and KMZ export
//!
//! Run with: cargo bench --bench conversion

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use mgrs_waypoints::data::{
    CoordinateConverter, GridReference, KmzExporter, MgrsConverter, Waypoint,
};
use std::hint::black_box;

/// Grid references spread over both hemispheres and several zones
const SAMPLE_GRIDS: &[&str] = &[
    "33TWN0000000000",
    "18SUJ2348306479",
    "56HLH3478652080",
    "33TVN1234567890",
    "33TWN 123 456",
];

/// Build `count` waypoints cycling through the sample references
fn generate_waypoints(count: usize) -> Vec<Waypoint> {
    let converter = MgrsConverter;
    (0..count)
        .map(|i| {
            let grid = GridReference::parse(SAMPLE_GRIDS[i % SAMPLE_GRIDS.len()]).unwrap();
            let position = converter.to_lat_lon(&grid).unwrap();
            Waypoint::new(format!("WP{i}"), &grid, position)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Elements(SAMPLE_GRIDS.len() as u64));

    group.bench_function("grid_reference", |b| {
        b.iter(|| {
            for raw in SAMPLE_GRIDS {
                black_box(GridReference::parse(black_box(raw)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let converter = MgrsConverter;
    let grids: Vec<GridReference> = SAMPLE_GRIDS
        .iter()
        .map(|raw| GridReference::parse(raw).unwrap())
        .collect();
    group.throughput(Throughput::Elements(grids.len() as u64));

    group.bench_function("to_lat_lon", |b| {
        b.iter(|| {
            for grid in &grids {
                black_box(converter.to_lat_lon(black_box(grid)).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    group.sample_size(20);

    let waypoints = generate_waypoints(1_000);
    group.throughput(Throughput::Elements(waypoints.len() as u64));
    group.bench_function("kmz_1k", |b| {
        b.iter(|| black_box(KmzExporter::to_bytes(black_box(&waypoints)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_convert, bench_export);
criterion_main!(benches);
