//! Benchmarks for Color-ID baking.
//!
//! Run with: cargo bench -p mesh-color-id
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-color-id -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-color-id -- --baseline main

#![allow(
    missing_docs,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_color_id::{BakeParams, ColorStrategy, bake_mesh, quantize_rgba, segment_islands};
use mesh_loops::{LoopTopology, PolyMesh, Point3, Uv, uv_grid, uv_grid_strips};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Quad torus with a cylindrical unwrap: one island cut open along two seams.
fn create_torus(major_segments: u32, minor_segments: u32) -> (PolyMesh, Vec<Uv>) {
    let (major_r, minor_r) = (1.0_f64, 0.25_f64);
    let face_count = (major_segments * minor_segments) as usize;
    let mut mesh = PolyMesh::with_capacity(face_count, face_count, face_count * 4);
    let mut uvs = Vec::with_capacity(face_count * 4);

    for i in 0..major_segments {
        let theta = f64::from(i) / f64::from(major_segments) * std::f64::consts::TAU;
        for j in 0..minor_segments {
            let phi = f64::from(j) / f64::from(minor_segments) * std::f64::consts::TAU;
            let ring = major_r + minor_r * phi.cos();
            mesh.add_vertex(Point3::new(
                ring * theta.cos(),
                ring * theta.sin(),
                minor_r * phi.sin(),
            ));
        }
    }

    let index = |i: u32, j: u32| (i % major_segments) * minor_segments + (j % minor_segments);
    let uv = |i: u32, j: u32| {
        Uv::new(
            i as f32 / major_segments as f32,
            j as f32 / minor_segments as f32,
        )
    };
    for i in 0..major_segments {
        for j in 0..minor_segments {
            mesh.add_face(&[
                index(i, j),
                index(i + 1, j),
                index(i + 1, j + 1),
                index(i, j + 1),
            ]);
            uvs.extend([uv(i, j), uv(i + 1, j), uv(i + 1, j + 1), uv(i, j + 1)]);
        }
    }

    (mesh, uvs)
}

// =============================================================================
// Bake Benchmarks
// =============================================================================

fn bench_bake(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bake");

    let test_cases = [
        ("grid_10k", uv_grid(100, 100)),
        ("strips_10k", uv_grid_strips(100, 100)),
        ("torus_9k", create_torus(192, 48)),
        ("grid_100k", uv_grid(320, 320)),
        ("strips_100k", uv_grid_strips(320, 320)),
    ];

    for (name, (mesh, uvs)) in &test_cases {
        let view = mesh.view(uvs).unwrap_or_else(|e| panic!("{name}: {e}"));
        group.throughput(Throughput::Elements(view.face_count() as u64));

        group.bench_with_input(BenchmarkId::new("serial", name), &view, |b, view| {
            let params = BakeParams::default().with_parallel(false);
            b.iter(|| bake_mesh(black_box(view), &params))
        });

        group.bench_with_input(BenchmarkId::new("parallel", name), &view, |b, view| {
            let params = BakeParams::default().with_parallel_threshold(0);
            b.iter(|| bake_mesh(black_box(view), &params))
        });
    }

    group.finish();
}

fn bench_million_faces(c: &mut Criterion) {
    let mut group = c.benchmark_group("MillionFaces");
    group.sample_size(10);

    let test_cases = [
        ("grid_1m", uv_grid(1000, 1000)),
        ("strips_1m", uv_grid_strips(1000, 1000)),
        ("torus_1m", create_torus(1536, 656)),
    ];

    for (name, (mesh, uvs)) in &test_cases {
        let view = mesh.view(uvs).unwrap_or_else(|e| panic!("{name}: {e}"));
        group.throughput(Throughput::Elements(view.face_count() as u64));

        group.bench_with_input(BenchmarkId::new("bake", name), &view, |b, view| {
            let params = BakeParams::for_large_meshes();
            b.iter(|| bake_mesh(black_box(view), &params))
        });
    }

    group.finish();
}

// =============================================================================
// Stage Benchmarks
// =============================================================================

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stages");
    let (mesh, uvs) = uv_grid_strips(320, 320);
    let view = mesh.view(&uvs).unwrap_or_else(|e| panic!("{e}"));

    group.bench_function("segment_strips_100k", |b| {
        let params = BakeParams::default();
        b.iter(|| segment_islands(black_box(&view), &params))
    });

    group.bench_function("lowest_free_strips_100k", |b| {
        let params = BakeParams::default().with_strategy(ColorStrategy::LowestFree);
        b.iter(|| bake_mesh(black_box(&view), &params))
    });

    let colors = bake_mesh(&view, &BakeParams::default()).unwrap_or_default();
    group.bench_function("quantize_strips_100k", |b| {
        b.iter(|| quantize_rgba(black_box(&colors)))
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_bake, bench_million_faces, bench_stages);

criterion_main!(benches);
